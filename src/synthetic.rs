//! Synthetic Reference Sets: Point Clouds with Known D₂
//!
//! Used to calibrate the estimator before trusting it on detector data:
//!
//! - **Line**: uniform points on the diagonal y = x, D₂ = 1
//! - **Square**: uniform points in the unit square, D₂ = 2
//! - **Hénon**: the Hénon attractor (a = 1.4, b = 0.3), D₂ ≈ 1.21
//!
//! All sets are returned min-max normalized, like loaded pulse data.
//!
//! ## References
//!
//! - Hénon, M. (1976). A two-dimensional mapping with a strange attractor.
//!   Commun. Math. Phys. 50, 69-77.
//! - Grassberger & Procaccia, Physica D 9, 189 (1983): D₂(Hénon) = 1.21 ± 0.01

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::data::PointSet;
use crate::error::{D2Error, Result};

/// Hénon map parameters
const HENON_A: f64 = 1.4;
const HENON_B: f64 = 0.3;
/// Iterations discarded before sampling the attractor
const HENON_TRANSIENT: usize = 1000;

/// Reference geometry with a known correlation dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSet {
    Line,
    Square,
    Henon,
}

impl ReferenceSet {
    pub const ALL: [ReferenceSet; 3] = [ReferenceSet::Line, ReferenceSet::Square, ReferenceSet::Henon];

    pub fn name(&self) -> &'static str {
        match self {
            ReferenceSet::Line => "Uniform line (y = x)",
            ReferenceSet::Square => "Uniform unit square",
            ReferenceSet::Henon => "Hénon attractor",
        }
    }

    /// Literature value of D₂
    pub fn known_dimension(&self) -> f64 {
        match self {
            ReferenceSet::Line => 1.0,
            ReferenceSet::Square => 2.0,
            ReferenceSet::Henon => 1.21,
        }
    }

    /// Draw `n` normalized points
    pub fn generate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<PointSet> {
        let points = match self {
            ReferenceSet::Line => uniform_line(n, rng)?,
            ReferenceSet::Square => uniform_square(n, rng)?,
            ReferenceSet::Henon => henon_attractor(n, rng)?,
        };
        Ok(points.normalized())
    }
}

fn unit_uniform() -> Result<Uniform<f64>> {
    Uniform::new(0.0, 1.0).map_err(|e| D2Error::InvalidConfig(e.to_string()))
}

/// Uniform points on the diagonal of the unit square
pub fn uniform_line<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<PointSet> {
    let uniform = unit_uniform()?;
    Ok(PointSet::from_pairs((0..n).map(|_| {
        let t = uniform.sample(rng);
        (t, t)
    })))
}

/// Uniform points filling the unit square
pub fn uniform_square<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<PointSet> {
    let uniform = unit_uniform()?;
    Ok(PointSet::from_pairs(
        (0..n).map(|_| (uniform.sample(rng), uniform.sample(rng))),
    ))
}

/// Orbit of the Hénon map from a random start near the origin
pub fn henon_attractor<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<PointSet> {
    let uniform = unit_uniform()?;
    let mut x = 0.1 * uniform.sample(rng);
    let mut y = 0.1 * uniform.sample(rng);

    let mut orbit = Vec::with_capacity(n);
    for step in 0..HENON_TRANSIENT + n {
        let next_x = 1.0 - HENON_A * x * x + y;
        y = HENON_B * x;
        x = next_x;
        if step >= HENON_TRANSIENT {
            orbit.push((x, y));
        }
    }

    Ok(PointSet::from_pairs(orbit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_line_points_lie_on_diagonal() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);
        let line = ReferenceSet::Line.generate(500, &mut rng).unwrap();
        assert_eq!(line.len(), 500);
        for row in line.points().rows() {
            assert!((row[0] - row[1]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_generated_sets_are_normalized() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(12);
        for set in ReferenceSet::ALL {
            let points = set.generate(2000, &mut rng).unwrap();
            for j in 0..2 {
                let (min, max) = points.column_range(j).unwrap();
                assert!(min.abs() < 1e-12, "{}: min {}", set.name(), min);
                assert!((max - 1.0).abs() < 1e-12, "{}: max {}", set.name(), max);
            }
        }
    }

    #[test]
    fn test_henon_orbit_is_bounded() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(13);
        let orbit = henon_attractor(5000, &mut rng).unwrap();
        let (xmin, xmax) = orbit.column_range(0).unwrap();
        assert!(xmin > -1.5 && xmax < 1.5);
        assert!(orbit.points().iter().all(|v| v.is_finite()));
    }
}

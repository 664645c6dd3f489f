//! Grassberger-Procaccia Correlation Integral
//!
//! For N points the correlation integral at radius r is
//!
//!   C(r) = 2 / (N(N−1)) · Σ_{i<j} Θ(r − |xᵢ − xⱼ|)
//!
//! i.e. the fraction of the N(N−1)/2 unique pairs closer than r (strictly).
//! Pair counting is the naive O(N²) loop; N is capped by a point budget.

use rand::seq::index;
use rand::Rng;
use serde::Serialize;

use super::radius::RadiusGrid;
use crate::config::AnalysisConfig;
use crate::data::PointSet;
use crate::error::{D2Error, Result};

/// Sampled correlation integral with its natural logarithms.
///
/// Radii where C(r) = 0 are dropped, so every entry has a finite log.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationCurve {
    pub radii: Vec<f64>,
    pub correlation: Vec<f64>,
    pub log_radii: Vec<f64>,
    pub log_correlation: Vec<f64>,
    /// Points used after subsampling
    pub n_points: usize,
}

impl CorrelationCurve {
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }
}

/// Correlation integral estimator over a fixed radius grid
#[derive(Debug, Clone)]
pub struct CorrelationIntegral {
    grid: RadiusGrid,
    max_points: usize,
}

impl CorrelationIntegral {
    pub fn new(grid: RadiusGrid, max_points: usize) -> Self {
        Self { grid, max_points }
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        let grid = RadiusGrid::logarithmic(config.r_min, config.r_max, config.n_radii)?;
        Ok(Self::new(grid, config.max_points))
    }

    pub fn grid(&self) -> &RadiusGrid {
        &self.grid
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Compute C(r) over the grid, subsampling to the point budget first.
    pub fn compute<R: Rng + ?Sized>(&self, points: &PointSet, rng: &mut R) -> Result<CorrelationCurve> {
        let sampled;
        let points = if points.len() > self.max_points {
            log::debug!(
                "Subsampling {} of {} points for pair counting",
                self.max_points,
                points.len()
            );
            sampled = subsample(points, self.max_points, rng);
            &sampled
        } else {
            points
        };

        let n = points.len();
        if n < 2 {
            return Err(D2Error::InsufficientData { required: 2, actual: n });
        }

        let counts = pair_counts(points, &self.grid);
        let n_pairs = (n as f64) * (n as f64 - 1.0) / 2.0;

        let mut curve = CorrelationCurve {
            radii: Vec::with_capacity(self.grid.len()),
            correlation: Vec::with_capacity(self.grid.len()),
            log_radii: Vec::with_capacity(self.grid.len()),
            log_correlation: Vec::with_capacity(self.grid.len()),
            n_points: n,
        };

        for (&r, &count) in self.grid.radii().iter().zip(counts.iter()) {
            if count == 0 {
                continue;
            }
            let c = count as f64 / n_pairs;
            curve.radii.push(r);
            curve.correlation.push(c);
            curve.log_radii.push(r.ln());
            curve.log_correlation.push(c.ln());
        }

        Ok(curve)
    }
}

/// Uniform subsample of exactly `size` points, without replacement
pub fn subsample<R: Rng + ?Sized>(points: &PointSet, size: usize, rng: &mut R) -> PointSet {
    let size = size.min(points.len());
    let indices = index::sample(rng, points.len(), size).into_vec();
    points.select(&indices)
}

/// Cumulative pair counts: entry k is the number of pairs with distance < r_k.
pub fn pair_counts(points: &PointSet, grid: &RadiusGrid) -> Vec<u64> {
    let n = points.len();
    let n_radii = grid.len();

    // histogram[k] = pairs whose smallest enclosing radius index is k
    let mut histogram = vec![0u64; n_radii + 1];
    for i in 0..n {
        for j in i + 1..n {
            let d = points.distance(i, j);
            histogram[grid.first_above(d)] += 1;
        }
    }

    let mut cumulative = Vec::with_capacity(n_radii);
    let mut running = 0u64;
    for &h in histogram.iter().take(n_radii) {
        running += h;
        cumulative.push(running);
    }
    cumulative
}

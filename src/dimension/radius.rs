//! Logarithmic radius grid
//!
//! r_k = 10^(log₁₀ r_min + k·(log₁₀ r_max − log₁₀ r_min)/(n − 1)),  k = 0..n

use crate::error::{D2Error, Result};

/// Strictly increasing, log-spaced radii
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusGrid {
    radii: Vec<f64>,
}

impl RadiusGrid {
    /// Build `n_radii` radii evenly spaced in log between `r_min` and `r_max`
    pub fn logarithmic(r_min: f64, r_max: f64, n_radii: usize) -> Result<Self> {
        if !(r_min > 0.0 && r_min < r_max && r_max.is_finite()) {
            return Err(D2Error::InvalidConfig(format!(
                "radius grid needs 0 < r_min < r_max (got {} .. {})",
                r_min, r_max
            )));
        }
        if n_radii < 2 {
            return Err(D2Error::InvalidConfig(format!(
                "radius grid needs at least 2 radii (got {})",
                n_radii
            )));
        }

        let lo = r_min.log10();
        let hi = r_max.log10();
        let step = (hi - lo) / (n_radii - 1) as f64;
        let radii = (0..n_radii)
            .map(|k| 10f64.powf(lo + step * k as f64))
            .collect();

        Ok(Self { radii })
    }

    pub fn radii(&self) -> &[f64] {
        &self.radii
    }

    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }

    /// Index of the smallest radius strictly greater than `d`.
    ///
    /// A pair at distance `d` counts towards C(r) for every radius from this
    /// index on. Returns `len()` when `d` is not below any radius, NaN
    /// included.
    #[inline]
    pub fn first_above(&self, d: f64) -> usize {
        self.radii.partition_point(|&r| d.is_nan() || r <= d)
    }
}

//! Bootstrap Uncertainty for D₂
//!
//! Each replicate draws a resample with replacement, recomputes the
//! correlation integral and refits the scaling region. The spread of the
//! replicate slopes is the reported uncertainty.
//!
//! Replicate `i` owns a generator seeded from `(seed, i)`, so the result does
//! not depend on how replicates are scheduled across the rayon pool.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::Serialize;

use super::correlation::CorrelationIntegral;
use super::fit::fit_curve;
use crate::config::{AnalysisConfig, FitRange};
use crate::data::PointSet;
use crate::error::{D2Error, Result};

/// Aggregate of replicate D₂ slopes
#[derive(Debug, Clone, Serialize)]
pub struct BootstrapResult {
    /// Mean replicate slope
    pub mean: f64,
    /// Population standard deviation of the replicate slopes
    pub std: f64,
    /// Points drawn per replicate
    pub sample_size: usize,
    /// Slopes in replicate order
    pub slopes: Vec<f64>,
}

impl BootstrapResult {
    pub fn from_slopes(slopes: Vec<f64>, sample_size: usize) -> Self {
        let n = slopes.len() as f64;
        let mean = slopes.iter().sum::<f64>() / n;
        let variance = slopes.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

        Self {
            mean,
            std: variance.sqrt(),
            sample_size,
            slopes,
        }
    }

    /// Percentile interval covering `level` of the replicate slopes
    pub fn percentile_interval(&self, level: f64) -> (f64, f64) {
        let mut sorted = self.slopes.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let tail = (1.0 - level.clamp(0.0, 1.0)) / 2.0;
        (percentile(&sorted, tail), percentile(&sorted, 1.0 - tail))
    }

    pub fn n_replicates(&self) -> usize {
        self.slopes.len()
    }
}

/// Linear-interpolated percentile of sorted data, `p` in [0, 1]
fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = p * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Seed for replicate `index` derived from the master seed (SplitMix64 finalizer)
pub fn replicate_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Bootstrap aggregator over the correlation-integral estimator
#[derive(Debug, Clone)]
pub struct BootstrapAggregator {
    estimator: CorrelationIntegral,
    fit_range: FitRange,
    n_bootstrap: usize,
    sample_fraction: f64,
}

impl BootstrapAggregator {
    pub fn new(
        estimator: CorrelationIntegral,
        fit_range: FitRange,
        n_bootstrap: usize,
        sample_fraction: f64,
    ) -> Self {
        Self {
            estimator,
            fit_range,
            n_bootstrap,
            sample_fraction,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        Ok(Self::new(
            CorrelationIntegral::from_config(config)?,
            config.fit_range,
            config.n_bootstrap,
            config.sample_fraction,
        ))
    }

    /// Points per replicate: min(floor(N · fraction), point budget)
    pub fn resample_size(&self, n_points: usize) -> usize {
        let by_fraction = (n_points as f64 * self.sample_fraction).floor() as usize;
        by_fraction.min(self.estimator.max_points())
    }

    /// Draw `resample_size` rows uniformly with replacement
    pub fn resample<R: Rng + ?Sized>(&self, points: &PointSet, rng: &mut R) -> PointSet {
        let size = self.resample_size(points.len());
        let indices: Vec<usize> = (0..size).map(|_| rng.random_range(0..points.len())).collect();
        points.select(&indices)
    }

    /// Draw one resample and return its fitted slope
    pub fn replicate<R: Rng + ?Sized>(&self, points: &PointSet, rng: &mut R) -> Result<f64> {
        let sample = self.resample(points, rng);
        let curve = self.estimator.compute(&sample, rng)?;
        Ok(fit_curve(&curve, &self.fit_range)?.slope)
    }

    /// Run all replicates in parallel and aggregate their slopes
    pub fn run(&self, points: &PointSet, seed: u64) -> Result<BootstrapResult> {
        if self.n_bootstrap == 0 {
            return Err(D2Error::InvalidConfig("n_bootstrap must be positive".to_string()));
        }
        let size = self.resample_size(points.len());
        if size < 2 {
            return Err(D2Error::InsufficientData { required: 2, actual: size });
        }

        log::info!(
            "Bootstrap: {} replicates of {} points (seed {})",
            self.n_bootstrap,
            size,
            seed
        );

        let slopes = (0..self.n_bootstrap)
            .into_par_iter()
            .map(|i| {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(replicate_seed(seed, i as u64));
                self.replicate(points, &mut rng)
            })
            .collect::<Result<Vec<f64>>>()?;

        let result = BootstrapResult::from_slopes(slopes, size);
        log::debug!("Bootstrap D₂ = {:.4} ± {:.4}", result.mean, result.std);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::RadiusGrid;
    use approx::assert_abs_diff_eq;

    fn grid_points(n: usize) -> PointSet {
        PointSet::from_pairs((0..n).map(|i| {
            let t = i as f64 / n as f64;
            (t, (t * 37.0).fract())
        }))
    }

    fn aggregator(n_bootstrap: usize) -> BootstrapAggregator {
        let estimator = CorrelationIntegral::new(RadiusGrid::logarithmic(1e-2, 1.0, 30).unwrap(), 400);
        BootstrapAggregator::new(estimator, FitRange::default(), n_bootstrap, 0.8)
    }

    #[test]
    fn test_from_slopes_population_std() {
        let result = BootstrapResult::from_slopes(vec![1.0, 2.0, 3.0, 4.0], 10);
        assert_abs_diff_eq!(result.mean, 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(result.std, 1.25f64.sqrt(), epsilon = 1e-12);

        let same = BootstrapResult::from_slopes(vec![1.3; 5], 10);
        assert_eq!(same.std, 0.0);
    }

    #[test]
    fn test_percentile_interval() {
        let slopes: Vec<f64> = (0..=100).map(|i| i as f64).collect();
        let result = BootstrapResult::from_slopes(slopes, 1);
        let (lo, hi) = result.percentile_interval(0.9);
        assert_abs_diff_eq!(lo, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hi, 95.0, epsilon = 1e-9);
    }

    #[test]
    fn test_resample_size_respects_budget() {
        let agg = aggregator(1);
        assert_eq!(agg.resample_size(100), 80);
        assert_eq!(agg.resample_size(1000), 400);
    }

    #[test]
    fn test_single_replicate_matches_direct_call() {
        let points = grid_points(300);
        let result = aggregator(1).run(&points, 99).unwrap();

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(replicate_seed(99, 0));
        let indices: Vec<usize> = (0..240).map(|_| rng.random_range(0..300)).collect();
        let sample = points.select(&indices);
        let estimator = CorrelationIntegral::new(RadiusGrid::logarithmic(1e-2, 1.0, 30).unwrap(), 400);
        let curve = estimator.compute(&sample, &mut rng).unwrap();
        let direct = fit_curve(&curve, &FitRange::default()).unwrap();

        assert_eq!(result.n_replicates(), 1);
        assert_eq!(result.sample_size, 240);
        assert_eq!(result.mean, direct.slope);
        assert_eq!(result.std, 0.0);
    }

    #[test]
    fn test_resample_draws_with_replacement() {
        let points = grid_points(50);
        let estimator = CorrelationIntegral::new(RadiusGrid::logarithmic(1e-2, 1.0, 30).unwrap(), 400);
        let agg = BootstrapAggregator::new(estimator, FitRange::default(), 1, 1.0);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);

        let sample = agg.resample(&points, &mut rng);
        assert_eq!(sample.len(), 50);

        // Every source row has a distinct time coordinate
        let mut times = sample.column(0).to_vec();
        times.sort_by(|a, b| a.total_cmp(b));
        times.dedup();
        assert!(times.len() < 50, "no repeated rows in {} draws", sample.len());
        assert!(times.iter().all(|t| (0..50).any(|i| *t == i as f64 / 50.0)));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let points = grid_points(300);
        let agg = aggregator(6);
        let a = agg.run(&points, 5).unwrap();
        let b = agg.run(&points, 5).unwrap();
        assert_eq!(a.slopes, b.slopes);
        assert!(a.std >= 0.0);
        assert!(a.slopes.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_tiny_input_is_insufficient() {
        let points = grid_points(2);
        let err = aggregator(3).run(&points, 0).unwrap_err();
        assert!(matches!(err, D2Error::InsufficientData { required: 2, actual: 1 }));
    }

    #[test]
    fn test_replicate_seeds_differ() {
        let seeds: Vec<u64> = (0..4).map(|i| replicate_seed(42, i)).collect();
        for i in 0..seeds.len() {
            for j in i + 1..seeds.len() {
                assert_ne!(seeds[i], seeds[j]);
            }
        }
    }
}

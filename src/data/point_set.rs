//! Point sets for correlation-dimension analysis
//!
//! A [`PointSet`] is an N×d matrix of points (one row per point). Row order
//! carries no meaning for D₂ but is kept stable so that seeded subsampling
//! picks the same rows on every run.

use ndarray::{Array2, ArrayView1, Axis};

use crate::error::{D2Error, Result};

/// One detector pulse: arrival time and deposited charge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub charge: f64,
}

/// Immutable ordered set of points
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    points: Array2<f64>,
}

impl PointSet {
    /// Wrap an existing N×d matrix. Every coordinate must be finite.
    pub fn new(points: Array2<f64>) -> Result<Self> {
        if let Some(((row, column), _)) = points.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(D2Error::NonFinite { row, column });
        }
        Ok(Self { points })
    }

    /// Build a 2D (time, charge) point set from raw samples
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut points = Array2::<f64>::zeros((samples.len(), 2));
        for (i, s) in samples.iter().enumerate() {
            points[[i, 0]] = s.time;
            points[[i, 1]] = s.charge;
        }
        Self { points }
    }

    /// Build a 2D point set from coordinate pairs
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let pairs: Vec<(f64, f64)> = pairs.into_iter().collect();
        let mut points = Array2::<f64>::zeros((pairs.len(), 2));
        for (i, (x, y)) in pairs.into_iter().enumerate() {
            points[[i, 0]] = x;
            points[[i, 1]] = y;
        }
        Self { points }
    }

    /// Return a copy with every column min-max scaled to [0, 1]
    pub fn normalized(&self) -> Self {
        let mut points = self.points.clone();
        for mut column in points.axis_iter_mut(Axis(1)) {
            let scaled = min_max_normalize(&column.to_vec());
            for (dst, src) in column.iter_mut().zip(scaled) {
                *dst = src;
            }
        }
        Self { points }
    }

    /// Rows at the given indices, in the given order (duplicates allowed)
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            points: self.points.select(Axis(0), indices),
        }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    /// Embedding dimension
    pub fn dim(&self) -> usize {
        self.points.ncols()
    }

    pub fn points(&self) -> &Array2<f64> {
        &self.points
    }

    /// View of coordinate `j` across all points
    pub fn column(&self, j: usize) -> ArrayView1<'_, f64> {
        self.points.column(j)
    }

    /// (min, max) of coordinate `j`, or None for an empty set
    pub fn column_range(&self, j: usize) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let col = self.points.column(j);
        let min = col.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = col.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    /// Euclidean distance between rows `i` and `j`
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        let a = self.points.row(i);
        let b = self.points.row(j);
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f64>()
            .sqrt()
    }
}

/// Min-max scale values to [0, 1].
///
/// A column with zero range (including a single value) maps to all zeros
/// instead of dividing by zero.
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if !range.is_finite() || range <= 0.0 {
        return vec![0.0; values.len()];
    }

    values.iter().map(|v| (v - min) / range).collect()
}

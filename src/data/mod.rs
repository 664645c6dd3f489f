//! Data Module: Pulse Records and Point Sets
//!
//! Turns detector output into the point clouds the estimator works on:
//!
//! - `loader.rs`: parses (time, charge) pulse records, tolerating and
//!   counting malformed lines
//! - `point_set.rs`: the immutable N×d [`PointSet`] and per-column
//!   min-max normalization to [0, 1]

mod loader;
mod point_set;

pub use loader::{load_pulses, LoadSummary, PulseData, PulseLoader};
pub use point_set::{min_max_normalize, PointSet, Sample};

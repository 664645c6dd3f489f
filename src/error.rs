//! Error types for the D₂ estimation pipeline.
//!
//! Malformed input lines are not errors: the loader drops them and counts
//! them in [`LoadSummary`](crate::data::LoadSummary). Everything here is a
//! structural failure that would otherwise turn into NaN downstream.

/// Errors raised by the loader, estimator, fitter and embedder.
#[derive(Debug, thiserror::Error)]
pub enum D2Error {
    #[error("no valid samples found in {0}")]
    Data(String),

    #[error("point ({row}, {column}) is not a finite coordinate")]
    NonFinite { row: usize, column: usize },

    #[error("insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("fit window [{start}, {end}) holds {window} points, need at least 2")]
    InsufficientFitRange {
        window: usize,
        start: usize,
        end: usize,
    },

    #[error("regression inputs differ in length: {x} x values, {y} y values")]
    LengthMismatch { x: usize, y: usize },

    #[error("log r has zero variance over the fit window")]
    DegenerateRegression,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration file: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, D2Error>;

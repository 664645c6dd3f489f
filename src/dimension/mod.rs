//! Dimension Module: Grassberger-Procaccia Correlation Dimension
//!
//! Estimates the correlation dimension D₂ of a point cloud.
//!
//! ## Mathematical Background
//!
//! For points {xᵢ} sampled from a set of dimension D₂, the fraction of pairs
//! closer than r scales as
//!
//!   C(r) ~ r^D₂    (r → 0)
//!
//! so D₂ is the slope of log C(r) against log r in the scaling region,
//! between the small-r noise floor and large-r saturation.
//!
//! ## Pipeline
//!
//! ```text
//! PointSet ─► CorrelationIntegral ─► CorrelationCurve ─► fit ─► FitResult
//!    │           (RadiusGrid)
//!    ├─► BootstrapAggregator (resample × n) ─► BootstrapResult
//!    └─► delay_embed (time only) ─► PointSet ─► ...
//! ```
//!
//! ## References
//!
//! - Grassberger & Procaccia, PRL 50, 346 (1983)
//! - Takens, "Detecting strange attractors in turbulence" (1981)

mod bootstrap;
mod correlation;
mod embedding;
mod fit;
mod radius;

pub use bootstrap::{replicate_seed, BootstrapAggregator, BootstrapResult};
pub use correlation::{pair_counts, subsample, CorrelationCurve, CorrelationIntegral};
pub use embedding::delay_embed;
pub use fit::{fit_curve, fit_scaling_region, linear_regression, FitResult};
pub use radius::RadiusGrid;

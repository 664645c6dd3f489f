//! Scaling-region fit
//!
//! D₂ is the slope of log C(r) against log r. Both ends of the curve are
//! unreliable (too few pairs at small r, saturation C → 1 at large r), so the
//! regression only uses a fractional window of the radii.

use serde::Serialize;

use super::correlation::CorrelationCurve;
use crate::config::FitRange;
use crate::error::{D2Error, Result};

/// Ordinary least-squares fit over the scaling region
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    /// Slope of log C vs log r (the D₂ estimate)
    pub slope: f64,
    /// Standard error of the slope
    pub standard_error: f64,
    /// Coefficient of determination R²
    pub r_squared: f64,
    pub intercept: f64,
    /// Points in the fit window
    pub n_points: usize,
}

/// Fit the scaling region of a correlation curve
pub fn fit_curve(curve: &CorrelationCurve, range: &FitRange) -> Result<FitResult> {
    fit_scaling_region(&curve.log_radii, &curve.log_correlation, range)
}

/// Regress `log_c` on `log_r` over the window selected by `range`.
///
/// Inputs are parallel sequences ordered by increasing radius.
pub fn fit_scaling_region(log_r: &[f64], log_c: &[f64], range: &FitRange) -> Result<FitResult> {
    let n = log_r.len().min(log_c.len());
    let window = range.window(n);
    let size = window.end.saturating_sub(window.start);

    if size < 2 {
        return Err(D2Error::InsufficientFitRange {
            window: size,
            start: window.start,
            end: window.end,
        });
    }

    linear_regression(&log_r[window.clone()], &log_c[window])
}

/// OLS of y on x with slope standard error and R².
///
/// R² is reported as 0 when either variable is constant. The slope error
/// needs n > 2 degrees of freedom; a two-point fit reports 0.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<FitResult> {
    if x.len() != y.len() {
        return Err(D2Error::LengthMismatch { x: x.len(), y: y.len() });
    }
    let n = x.len();
    let nf = n as f64;

    let mean_x = x.iter().sum::<f64>() / nf;
    let mean_y = y.iter().sum::<f64>() / nf;

    let mut ss_xx = 0.0;
    let mut ss_yy = 0.0;
    let mut ss_xy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
        ss_xy += dx * dy;
    }

    if ss_xx <= 0.0 {
        return Err(D2Error::DegenerateRegression);
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;

    let r = if ss_yy > 0.0 {
        (ss_xy / (ss_xx * ss_yy).sqrt()).clamp(-1.0, 1.0)
    } else {
        0.0
    };

    let standard_error = if n > 2 {
        ((1.0 - r * r).max(0.0) * ss_yy / ss_xx / (nf - 2.0)).sqrt()
    } else {
        0.0
    };

    Ok(FitResult {
        slope,
        standard_error,
        r_squared: r * r,
        intercept,
        n_points: n,
    })
}

//! Comparison against a predicted D₂ and the printed report

use std::fmt;

use serde::Serialize;

use crate::data::LoadSummary;
use crate::dimension::{BootstrapResult, FitResult};

/// Qualitative outcome of the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Confirmed,
    PartiallySupported,
    NotSupported,
}

impl Verdict {
    /// Classify an absolute difference with strict `<` against both thresholds
    pub fn classify(difference: f64, confirm_threshold: f64, partial_threshold: f64) -> Self {
        if difference < confirm_threshold {
            Verdict::Confirmed
        } else if difference < partial_threshold {
            Verdict::PartiallySupported
        } else {
            Verdict::NotSupported
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Verdict::Confirmed => "✓ Prediction CONFIRMED within tolerance",
            Verdict::PartiallySupported => "⚠ Prediction PARTIALLY supported",
            Verdict::NotSupported => "✗ Prediction NOT supported by this data",
        }
    }
}

/// Measured D₂ against the predicted value
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Comparison {
    pub predicted: f64,
    pub measured: f64,
    pub uncertainty: f64,
    /// |measured − predicted|
    pub difference: f64,
    /// (1 − difference / predicted) · 100
    pub match_percent: f64,
    /// difference / uncertainty; None when the uncertainty is zero
    pub sigma_deviation: Option<f64>,
}

impl Comparison {
    pub fn new(predicted: f64, measured: f64, uncertainty: f64) -> Self {
        let difference = (measured - predicted).abs();
        let match_percent = (1.0 - difference / predicted) * 100.0;
        let sigma_deviation = if uncertainty > 0.0 {
            Some(difference / uncertainty)
        } else {
            None
        };

        Self {
            predicted,
            measured,
            uncertainty,
            difference,
            match_percent,
            sigma_deviation,
        }
    }
}

/// Everything a single analysis run produces
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub source: String,
    pub load: LoadSummary,
    pub time_range: (f64, f64),
    pub charge_range: (f64, f64),
    /// D₂ in the (time, charge) plane
    pub full: FitResult,
    pub full_points_used: usize,
    pub bootstrap: BootstrapResult,
    /// D₂ from the delay-embedded time series
    pub time_only: FitResult,
    pub embedding_delay: usize,
    pub prediction: f64,
    pub comparison_2d: Comparison,
    pub comparison_time: Comparison,
    pub verdict: Verdict,
    pub reference_note: Option<String>,
}

const RULE: &str = "======================================================================";

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Loaded {} pulses from {}", self.load.accepted, self.source)?;
        if self.load.skipped > 0 {
            writeln!(f, "Skipped {} malformed line(s)", self.load.skipped)?;
        }
        writeln!(
            f,
            "Time range: {:.3} - {:.3} (normalized)",
            self.time_range.0, self.time_range.1
        )?;
        writeln!(
            f,
            "Charge range: {:.3} - {:.3} (normalized)",
            self.charge_range.0, self.charge_range.1
        )?;
        writeln!(f)?;

        writeln!(f, "D₂ (time-charge 2D space, {} points):", self.full_points_used)?;
        writeln!(
            f,
            "  D₂ = {:.3} ± {:.3} (R² = {:.4})",
            self.full.slope, self.full.standard_error, self.full.r_squared
        )?;
        writeln!(f)?;

        let (lo, hi) = self.bootstrap.percentile_interval(0.95);
        writeln!(
            f,
            "Bootstrap ({} resamples of {} points):",
            self.bootstrap.n_replicates(),
            self.bootstrap.sample_size
        )?;
        writeln!(f, "  D₂ = {:.3} ± {:.3}", self.bootstrap.mean, self.bootstrap.std)?;
        writeln!(f, "  95% percentile interval: [{:.3}, {:.3}]", lo, hi)?;
        writeln!(f)?;

        writeln!(f, "Time-only (delay embedding, τ = {}):", self.embedding_delay)?;
        writeln!(
            f,
            "  D₂ = {:.3} ± {:.3} (R² = {:.4})",
            self.time_only.slope, self.time_only.standard_error, self.time_only.r_squared
        )?;
        writeln!(f)?;

        writeln!(f, "{}", RULE)?;
        writeln!(f, "COMPARISON TO PREDICTION")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f)?;
        writeln!(f, "Predicted D₂:          {:.4}", self.prediction)?;
        writeln!(
            f,
            "Measured D₂ (2D):      {:.3} ± {:.3}",
            self.comparison_2d.measured, self.comparison_2d.uncertainty
        )?;
        writeln!(
            f,
            "Measured D₂ (time):    {:.3} ± {:.3}",
            self.comparison_time.measured, self.comparison_time.uncertainty
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "2D Match:   {:.1}% (diff = {:.3})",
            self.comparison_2d.match_percent, self.comparison_2d.difference
        )?;
        writeln!(
            f,
            "Time Match: {:.1}% (diff = {:.3})",
            self.comparison_time.match_percent, self.comparison_time.difference
        )?;
        writeln!(f)?;

        match self.comparison_2d.sigma_deviation {
            Some(sigma) => writeln!(f, "2D deviation: {:.1}σ from prediction", sigma)?,
            None => writeln!(f, "2D deviation: undefined (zero bootstrap spread)")?,
        }
        writeln!(f)?;
        writeln!(f, "{}", self.verdict.describe())?;

        if let Some(note) = &self.reference_note {
            writeln!(f)?;
            writeln!(f, "{}", RULE)?;
            writeln!(f, "Note: single-event analysis; statistical power is limited")?;
            writeln!(f, "{}", note)?;
            write!(f, "{}", RULE)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_verdict_thresholds_are_strict() {
        assert_eq!(Verdict::classify(0.10, 0.15, 0.30), Verdict::Confirmed);
        assert_eq!(Verdict::classify(0.15, 0.15, 0.30), Verdict::PartiallySupported);
        assert_eq!(Verdict::classify(0.29, 0.15, 0.30), Verdict::PartiallySupported);
        assert_eq!(Verdict::classify(0.30, 0.15, 0.30), Verdict::NotSupported);
    }

    #[test]
    fn test_comparison_metrics() {
        let predicted = 19.0 / 13.0;
        let cmp = Comparison::new(predicted, 1.5, 0.1);
        assert_abs_diff_eq!(cmp.difference, 1.5 - predicted, epsilon = 1e-12);
        assert_abs_diff_eq!(
            cmp.match_percent,
            (1.0 - (1.5 - predicted) / predicted) * 100.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(cmp.sigma_deviation.unwrap(), (1.5 - predicted) / 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_spread_has_no_sigma() {
        let cmp = Comparison::new(1.0, 1.2, 0.0);
        assert!(cmp.sigma_deviation.is_none());
        assert!(cmp.match_percent.is_finite());
    }
}

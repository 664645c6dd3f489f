//! Time-delay embedding
//!
//! Reconstructs a 2D phase portrait from a scalar series by pairing each
//! value with the one τ steps later: (x[i], x[i+τ]) for i in 0..len−τ.

use crate::data::PointSet;
use crate::error::{D2Error, Result};

/// Embed `series` in 2D with delay `tau`
pub fn delay_embed(series: &[f64], tau: usize) -> Result<PointSet> {
    if tau == 0 {
        return Err(D2Error::InvalidConfig("embedding delay must be positive".to_string()));
    }
    if series.len() <= tau {
        return Err(D2Error::InsufficientData {
            required: tau + 1,
            actual: series.len(),
        });
    }

    let pairs = series.iter().zip(series[tau..].iter()).map(|(&a, &b)| (a, b));
    Ok(PointSet::from_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_values_delay_ten() {
        let series: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let embedded = delay_embed(&series, 10).unwrap();

        assert_eq!(embedded.len(), 2);
        assert_eq!(embedded.points()[[0, 0]], 0.0);
        assert_eq!(embedded.points()[[0, 1]], 10.0);
        assert_eq!(embedded.points()[[1, 0]], 1.0);
        assert_eq!(embedded.points()[[1, 1]], 11.0);
    }

    #[test]
    fn test_series_not_longer_than_delay() {
        let series = vec![0.5; 10];
        let err = delay_embed(&series, 10).unwrap_err();
        assert!(matches!(err, D2Error::InsufficientData { required: 11, actual: 10 }));
    }

    #[test]
    fn test_zero_delay_rejected() {
        assert!(matches!(delay_embed(&[1.0, 2.0], 0), Err(D2Error::InvalidConfig(_))));
    }
}

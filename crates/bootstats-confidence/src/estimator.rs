//! Summaries of a bootstrap distribution
//!
//! Standard error, bias, percentile bounds and the Wald test. These
//! functions expect the finite replicate values; apply the run's
//! [`NonFinitePolicy`](crate::NonFinitePolicy) first. Results do not depend
//! on the order of the values.

use crate::ConfidenceLevel;
use bootstats_core::{math::distributions::normal, Error, QuantileInterpolation, Result};

fn check_distribution(values: &[f64]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: 0,
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite("bootstrap distribution"));
    }
    Ok(())
}

/// Empirical standard error: sample standard deviation (`n - 1`) of the
/// replicate values
///
/// A single replicate leaves the standard deviation undefined and is
/// reported as [`Error::NumericDegeneracy`] rather than a silent zero.
pub fn standard_error(values: &[f64]) -> Result<f64> {
    check_distribution(values)?;
    if values.len() < 2 {
        return Err(Error::NumericDegeneracy(format!(
            "standard error needs at least 2 finite replicates, got {}",
            values.len()
        )));
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let ss = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Ok((ss / (n - 1.0)).sqrt())
}

/// Bootstrap bias estimate `mean(t*) - t0`
pub fn bias(values: &[f64], original_estimate: f64) -> Result<f64> {
    check_distribution(values)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64 - original_estimate)
}

/// Lower and upper percentile bounds `(q_{α/2}, q_{1-α/2})` of sorted values
pub fn percentile_bounds(
    sorted: &[f64],
    confidence_level: ConfidenceLevel,
    interpolation: QuantileInterpolation,
) -> Result<(f64, f64)> {
    check_distribution(sorted)?;
    let (p_lower, p_upper) = confidence_level.two_sided_probabilities();
    Ok((
        interpolation.quantile_sorted(sorted, p_lower)?,
        interpolation.quantile_sorted(sorted, p_upper)?,
    ))
}

/// Sort finite replicate values ascending
pub fn sort_values(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Wald test of `estimate = null_value` using a standard error
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaldTest {
    /// `(estimate - null_value) / standard_error`
    pub z: f64,
    /// Two-sided p-value `2 (1 - Φ(|z|))`
    pub p_value: f64,
}

/// Wald z statistic and two-sided p-value
pub fn wald_test(estimate: f64, null_value: f64, standard_error: f64) -> Result<WaldTest> {
    if !estimate.is_finite() || !null_value.is_finite() {
        return Err(Error::non_finite("Wald test input"));
    }
    if !(standard_error > 0.0 && standard_error.is_finite()) {
        return Err(Error::NumericDegeneracy(format!(
            "Wald statistic undefined for standard error {standard_error}"
        )));
    }
    let z = (estimate - null_value) / standard_error;
    Ok(WaldTest {
        z,
        p_value: normal::two_sided_p_value(z),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bootstats_core::ErrorKind;

    #[test]
    fn test_standard_error() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(
            standard_error(&values).unwrap(),
            (32.0f64 / 7.0).sqrt(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_single_replicate_is_degenerate() {
        let err = standard_error(&[3.0]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericDegeneracy);
    }

    #[test]
    fn test_empty_distribution_is_invalid_input() {
        let err = standard_error(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(percentile_bounds(&[], ConfidenceLevel::NINETY_FIVE, QuantileInterpolation::Linear).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(standard_error(&[1.0, f64::NAN, 2.0]).is_err());
        assert!(bias(&[1.0, f64::INFINITY], 0.0).is_err());
    }

    #[test]
    fn test_bias() {
        assert_relative_eq!(bias(&[1.0, 2.0, 3.0], 1.5).unwrap(), 0.5);
    }

    #[test]
    fn test_percentile_bounds() {
        let sorted: Vec<f64> = (0..=100).map(f64::from).collect();
        let (lo, hi) =
            percentile_bounds(&sorted, ConfidenceLevel::NINETY_FIVE, QuantileInterpolation::Linear)
                .unwrap();
        assert_relative_eq!(lo, 2.5, epsilon = 1e-9);
        assert_relative_eq!(hi, 97.5, epsilon = 1e-9);
    }

    #[test]
    fn test_wald_test() {
        let wald = wald_test(0.625, 0.0, 0.7846177413237607).unwrap();
        assert_relative_eq!(wald.z, 0.7965662348464577, epsilon = 1e-12);
        assert_relative_eq!(wald.p_value, 0.4257029938142636, epsilon = 1e-9);

        let shifted = wald_test(1.625, 1.0, 0.7846177413237607).unwrap();
        assert_relative_eq!(shifted.z, wald.z, epsilon = 1e-12);
    }

    #[test]
    fn test_wald_zero_standard_error() {
        let err = wald_test(1.0, 0.0, 0.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericDegeneracy);
    }

    #[test]
    fn test_sort_values() {
        assert_eq!(sort_values(&[3.0, -1.0, 2.0]), vec![-1.0, 2.0, 3.0]);
    }
}

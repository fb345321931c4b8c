//! z-tests for means
//!
//! The statistic is `(estimate - null_value) / se` compared with the
//! standard normal distribution. The standard deviation is either known in
//! advance or estimated from the data (plug-in, denominator `n - 1`).
//!
//! Differences are always taken as *second minus first*: `y - x` for paired
//! data and `mean(second) - mean(first)` for independent samples.

use crate::{Alternative, TestResult};
use bootstats_confidence::{ConfidenceInterval, ConfidenceLevel};
use bootstats_core::{descriptive, Error, Result};
use tracing::debug;

/// Source of the population standard deviation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Sigma {
    /// Plug in the sample standard deviation
    #[default]
    Estimated,
    /// Known population standard deviation
    Known(f64),
}

/// Mean, standard deviation and size of one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub mean: f64,
    pub sd: f64,
    pub n: usize,
}

impl SampleSummary {
    pub fn new(mean: f64, sd: f64, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }
        if !mean.is_finite() {
            return Err(Error::InvalidInput(format!("Mean must be finite, got {mean}")));
        }
        if !(sd.is_finite() && sd >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "Standard deviation must be finite and non-negative, got {sd}"
            )));
        }
        Ok(Self { mean, sd, n })
    }

    /// Summarise a raw sample using `sigma` for the standard deviation
    pub fn from_sample(sample: &[f64], sigma: Sigma) -> Result<Self> {
        if sample.iter().any(|x| !x.is_finite()) {
            return Err(Error::InvalidInput(
                "Sample contains NaN or infinite values".to_string(),
            ));
        }
        let mean = descriptive::mean(sample)?;
        let sd = match sigma {
            Sigma::Known(sd) => {
                if !(sd.is_finite() && sd > 0.0) {
                    return Err(Error::InvalidParameter(format!(
                        "Known standard deviation must be positive, got {sd}"
                    )));
                }
                sd
            }
            Sigma::Estimated => descriptive::std_dev(sample)?,
        };
        Self::new(mean, sd, sample.len())
    }

    /// Standard error of the mean
    pub fn standard_error(&self) -> f64 {
        self.sd / (self.n as f64).sqrt()
    }
}

/// z-test settings
///
/// ```rust
/// use bootstats_hypothesis::{Alternative, Sigma, ZTest};
///
/// let sample = [5.1, 4.9, 5.6, 5.8, 6.0, 5.4, 5.2, 5.7];
/// let result = ZTest::new()
///     .with_null_value(5.0)
///     .with_alternative(Alternative::Greater)
///     .one_sample(&sample, Sigma::Known(0.5))
///     .unwrap();
/// assert!(result.p_value < 0.05);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZTest {
    null_value: f64,
    alternative: Alternative,
    confidence_level: f64,
}

impl Default for ZTest {
    fn default() -> Self {
        Self {
            null_value: 0.0,
            alternative: Alternative::TwoSided,
            confidence_level: 0.95,
        }
    }
}

impl ZTest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hypothesised mean (one-sample, paired) or difference (two-sample)
    pub fn with_null_value(mut self, null_value: f64) -> Self {
        self.null_value = null_value;
        self
    }

    pub fn with_alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    /// Confidence level of the reported interval
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    /// One-sample test from a raw sample
    pub fn one_sample(&self, sample: &[f64], sigma: Sigma) -> Result<TestResult> {
        let summary = SampleSummary::from_sample(sample, sigma)?;
        self.one_sample_from_summary(summary)
    }

    /// One-sample test from summary statistics
    pub fn one_sample_from_summary(&self, summary: SampleSummary) -> Result<TestResult> {
        self.evaluate(summary.mean, summary.standard_error())
    }

    /// Paired test: one-sample test on `d = y - x`
    pub fn paired(&self, x: &[f64], y: &[f64], sigma: Sigma) -> Result<TestResult> {
        let differences = descriptive::paired_differences(x, y)?;
        self.one_sample(&differences, sigma)
    }

    /// Test of `mean(second) - mean(first)` for independent samples
    pub fn two_sample(
        &self,
        first: &[f64],
        second: &[f64],
        sigma_first: Sigma,
        sigma_second: Sigma,
    ) -> Result<TestResult> {
        let a = SampleSummary::from_sample(first, sigma_first)?;
        let b = SampleSummary::from_sample(second, sigma_second)?;
        self.two_sample_from_summary(a, b)
    }

    /// Two-sample test from summary statistics
    pub fn two_sample_from_summary(
        &self,
        first: SampleSummary,
        second: SampleSummary,
    ) -> Result<TestResult> {
        let se = (first.standard_error().powi(2) + second.standard_error().powi(2)).sqrt();
        self.evaluate(second.mean - first.mean, se)
    }

    fn evaluate(&self, estimate: f64, se: f64) -> Result<TestResult> {
        let level = ConfidenceLevel::new(self.confidence_level)?;
        if !self.null_value.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "Null value must be finite, got {}",
                self.null_value
            )));
        }
        if !(se > 0.0 && se.is_finite()) {
            return Err(Error::zero_variance("z-test standard error"));
        }

        let z = (estimate - self.null_value) / se;
        let p_value = self.alternative.normal_p_value(z);
        let (lower, upper) = match self.alternative {
            Alternative::TwoSided => {
                let margin = level.two_sided_z() * se;
                (estimate - margin, estimate + margin)
            }
            Alternative::Greater => (
                estimate - level.one_sided_z() * se,
                f64::INFINITY,
            ),
            Alternative::Less => (
                f64::NEG_INFINITY,
                estimate + level.one_sided_z() * se,
            ),
        };

        debug!(estimate, se, z, p_value, alternative = self.alternative.name(), "z-test");

        Ok(TestResult {
            statistic: z,
            p_value,
            ci: Some(ConfidenceInterval::new(lower, upper, estimate, level.value())),
            alternative: self.alternative,
            df: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bootstats_core::ErrorKind;

    const X: [f64; 16] = [
        10.0, 12.0, 15.0, 20.0, 7.0, 11.0, 15.0, 18.0, 9.0, 10.0, 11.0, 13.0, 15.0, 16.0, 9.0, 10.0,
    ];
    const Y: [f64; 16] = [
        11.0, 9.0, 14.0, 18.0, 12.0, 10.0, 9.0, 17.0, 15.0, 12.0, 12.0, 14.0, 15.0, 16.0, 14.0,
        13.0,
    ];

    #[test]
    fn test_paired_z_test() {
        let result = ZTest::new().paired(&X, &Y, Sigma::Estimated).unwrap();
        let ci = result.ci.unwrap();

        assert_relative_eq!(ci.estimate, 0.625, epsilon = 1e-12);
        assert_relative_eq!(result.statistic, 0.7965662348464577, epsilon = 1e-10);
        assert_relative_eq!(result.p_value, 0.4257029938142636, epsilon = 1e-8);
        assert_relative_eq!(ci.lower, -0.9128225146257352, epsilon = 1e-8);
        assert_relative_eq!(ci.upper, 2.162822514625735, epsilon = 1e-8);
        assert_eq!(result.df, None);
    }

    #[test]
    fn test_one_sided_alternatives() {
        let greater = ZTest::new()
            .with_alternative(Alternative::Greater)
            .paired(&X, &Y, Sigma::Estimated)
            .unwrap();
        let less = ZTest::new()
            .with_alternative(Alternative::Less)
            .paired(&X, &Y, Sigma::Estimated)
            .unwrap();

        assert_relative_eq!(greater.p_value, 0.2128514969071318, epsilon = 1e-8);
        assert_relative_eq!(less.p_value, 0.7871485030928682, epsilon = 1e-8);
        assert_relative_eq!(greater.ci_lower().unwrap(), -0.6655813375868593, epsilon = 1e-8);
        assert_eq!(greater.ci_upper(), Some(f64::INFINITY));
        assert_eq!(less.ci_lower(), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_known_sigma() {
        let sample = [1.0, 2.0, 3.0, 4.0];
        let result = ZTest::new()
            .with_null_value(2.0)
            .one_sample(&sample, Sigma::Known(2.0))
            .unwrap();
        // (2.5 - 2) / (2 / 2)
        assert_relative_eq!(result.statistic, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_summary_matches_raw() {
        let raw = ZTest::new().one_sample(&X, Sigma::Estimated).unwrap();
        let mean = descriptive::mean(&X).unwrap();
        let sd = descriptive::std_dev(&X).unwrap();
        let summary = ZTest::new()
            .one_sample_from_summary(SampleSummary::new(mean, sd, X.len()).unwrap())
            .unwrap();
        assert_eq!(raw, summary);
    }

    #[test]
    fn test_two_sample() {
        let first = [1.0, 2.0, 3.0, 4.0, 5.0];
        let second = [3.0, 4.0, 5.0, 6.0, 7.0];
        let result = ZTest::new()
            .two_sample(&first, &second, Sigma::Known(1.0), Sigma::Known(1.0))
            .unwrap();
        // 2 / sqrt(1/5 + 1/5)
        assert_relative_eq!(result.statistic, 2.0 / 0.4f64.sqrt(), epsilon = 1e-12);
        assert!(result.is_significant(0.01));
        assert_relative_eq!(result.ci.unwrap().estimate, 2.0, epsilon = 1e-12);

        let null_diff = ZTest::new()
            .with_null_value(2.0)
            .two_sample(&first, &second, Sigma::Estimated, Sigma::Estimated)
            .unwrap();
        assert_relative_eq!(null_diff.statistic, 0.0, epsilon = 1e-12);
        assert_relative_eq!(null_diff.p_value, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_variance() {
        let err = ZTest::new().one_sample(&[3.0, 3.0, 3.0], Sigma::Estimated).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericDegeneracy);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(ZTest::new().one_sample(&[], Sigma::Known(1.0)).is_err());
        assert!(ZTest::new().one_sample(&[1.0], Sigma::Estimated).is_err());
        assert!(ZTest::new().one_sample(&[1.0, 2.0], Sigma::Known(-1.0)).is_err());
        assert!(ZTest::new().one_sample(&[1.0, f64::NAN], Sigma::Known(1.0)).is_err());
        assert!(ZTest::new().paired(&[1.0, 2.0], &[1.0], Sigma::Estimated).is_err());
        assert!(ZTest::new()
            .with_confidence_level(1.0)
            .one_sample(&[1.0, 2.0], Sigma::Known(1.0))
            .is_err());
    }
}

//! Statistics evaluated on the original sample and on every replicate
//!
//! A statistic is any pure function from a sample to one real number.
//! Closures implement the traits directly, so
//! `|s: &[f64]| s.iter().sum::<f64>()` can be handed to the bootstrap as-is.
//!
//! A statistic may legitimately be undefined on some replicates (a ratio
//! whose denominator resamples to zero, a correlation of a constant
//! replicate). Those replicates produce NaN or an infinity; the
//! [`NonFinitePolicy`] decides whether they are excluded from the
//! distribution or abort the run.

use bootstats_core::{descriptive, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Statistic of a single sample
pub trait Statistic<T>: Send + Sync {
    /// Evaluate on a sample; NaN signals "undefined for this sample"
    fn evaluate(&self, sample: &[T]) -> f64;
}

impl<T, F> Statistic<T> for F
where
    F: Fn(&[T]) -> f64 + Send + Sync,
{
    fn evaluate(&self, sample: &[T]) -> f64 {
        self(sample)
    }
}

/// Statistic comparing two independent samples
pub trait TwoSampleStatistic: Send + Sync {
    fn evaluate(&self, first: &[f64], second: &[f64]) -> f64;
}

impl<F> TwoSampleStatistic for F
where
    F: Fn(&[f64], &[f64]) -> f64 + Send + Sync,
{
    fn evaluate(&self, first: &[f64], second: &[f64]) -> f64 {
        self(first, second)
    }
}

/// Adapter for statistics that report failure through [`Result`]
///
/// An `Err` becomes NaN so the replicate is handled by the run's
/// [`NonFinitePolicy`] like any other undefined value.
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

/// Wrap a fallible statistic
pub fn fallible<F>(f: F) -> Fallible<F> {
    Fallible(f)
}

impl<T, F> Statistic<T> for Fallible<F>
where
    F: Fn(&[T]) -> Result<f64> + Send + Sync,
{
    fn evaluate(&self, sample: &[T]) -> f64 {
        match (self.0)(sample) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "statistic failed on sample, recording NaN");
                f64::NAN
            }
        }
    }
}

/// Sample mean
#[derive(Debug, Clone, Copy, Default)]
pub struct Mean;

impl Statistic<f64> for Mean {
    fn evaluate(&self, sample: &[f64]) -> f64 {
        descriptive::mean(sample).unwrap_or(f64::NAN)
    }
}

/// Sample median
#[derive(Debug, Clone, Copy, Default)]
pub struct Median;

impl Statistic<f64> for Median {
    fn evaluate(&self, sample: &[f64]) -> f64 {
        descriptive::median(sample).unwrap_or(f64::NAN)
    }
}

/// Mean of the paired differences `y - x`
#[derive(Debug, Clone, Copy, Default)]
pub struct PairedMeanDifference;

impl Statistic<(f64, f64)> for PairedMeanDifference {
    fn evaluate(&self, pairs: &[(f64, f64)]) -> f64 {
        if pairs.is_empty() {
            return f64::NAN;
        }
        pairs.iter().map(|(x, y)| y - x).sum::<f64>() / pairs.len() as f64
    }
}

/// Difference of means `mean(second) - mean(first)`
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanDifference;

impl TwoSampleStatistic for MeanDifference {
    fn evaluate(&self, first: &[f64], second: &[f64]) -> f64 {
        match (descriptive::mean(first), descriptive::mean(second)) {
            (Ok(a), Ok(b)) => b - a,
            _ => f64::NAN,
        }
    }
}

/// Difference of medians `median(second) - median(first)`
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianDifference;

impl TwoSampleStatistic for MedianDifference {
    fn evaluate(&self, first: &[f64], second: &[f64]) -> f64 {
        match (descriptive::median(first), descriptive::median(second)) {
            (Ok(a), Ok(b)) => b - a,
            _ => f64::NAN,
        }
    }
}

/// What to do with replicates whose statistic is NaN or infinite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NonFinitePolicy {
    /// Drop them from the distribution and report how many were dropped
    #[default]
    Exclude,
    /// Stop drawing replicates at the first such replicate and return an error
    FailFast,
}

impl NonFinitePolicy {
    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exclude => "exclude",
            Self::FailFast => "fail_fast",
        }
    }

    /// Split a raw replicate distribution into finite values and an excluded count
    ///
    /// The finite values keep their replicate order.
    pub fn apply(&self, distribution: &[f64]) -> Result<(Vec<f64>, usize)> {
        match self {
            Self::Exclude => {
                let finite: Vec<f64> = distribution.iter().copied().filter(|v| v.is_finite()).collect();
                let excluded = distribution.len() - finite.len();
                Ok((finite, excluded))
            }
            Self::FailFast => {
                if let Some((index, value)) = distribution
                    .iter()
                    .enumerate()
                    .find(|(_, v)| !v.is_finite())
                {
                    return Err(Error::Computation(format!(
                        "replicate {index} produced a non-finite statistic ({value})"
                    )));
                }
                Ok((distribution.to_vec(), 0))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bootstats_core::ErrorKind;

    #[test]
    fn test_closure_statistic() {
        let data = [1.0, 2.0, 3.0];
        let sum = |s: &[f64]| s.iter().sum::<f64>();
        assert_eq!(Statistic::<f64>::evaluate(&sum, &data), 6.0);

        let diff = |a: &[f64], b: &[f64]| b[0] - a[0];
        assert_eq!(TwoSampleStatistic::evaluate(&diff, &data[..1], &[4.0]), 3.0);
    }

    #[test]
    fn test_builtin_statistics() {
        assert_eq!(Mean.evaluate(&[1.0, 2.0, 6.0]), 3.0);
        assert_eq!(Median.evaluate(&[1.0, 2.0, 6.0]), 2.0);
        assert!(Mean.evaluate(&[]).is_nan());
        assert_eq!(PairedMeanDifference.evaluate(&[(1.0, 2.0), (3.0, 5.0)]), 1.5);
        assert_eq!(MeanDifference.evaluate(&[1.0, 3.0], &[4.0, 6.0]), 3.0);
        assert_eq!(MedianDifference.evaluate(&[1.0, 2.0, 9.0], &[2.0, 4.0, 5.0]), 2.0);
    }

    #[test]
    fn test_fallible_statistic() {
        let ratio = fallible(|s: &[f64]| {
            let denom = s[1];
            if denom == 0.0 {
                Err(Error::zero_variance("ratio"))
            } else {
                Ok(s[0] / denom)
            }
        });
        assert_eq!(ratio.evaluate(&[6.0, 2.0]), 3.0);
        assert!(ratio.evaluate(&[6.0, 0.0]).is_nan());
    }

    #[test]
    fn test_exclude_policy() {
        let (finite, excluded) = NonFinitePolicy::Exclude
            .apply(&[1.0, f64::NAN, 2.0, f64::INFINITY])
            .unwrap();
        assert_eq!(finite, vec![1.0, 2.0]);
        assert_eq!(excluded, 2);
    }

    #[test]
    fn test_fail_fast_policy() {
        let err = NonFinitePolicy::FailFast.apply(&[1.0, 2.0, f64::NAN]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Computation);
        assert!(err.to_string().contains("replicate 2"));

        let (all, excluded) = NonFinitePolicy::FailFast.apply(&[1.0, 2.0]).unwrap();
        assert_eq!(all, vec![1.0, 2.0]);
        assert_eq!(excluded, 0);
    }
}

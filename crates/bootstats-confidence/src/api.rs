//! High-level API for bootstrap confidence intervals
//!
//! Shortcuts for the common cases: the mean of one sample and the
//! difference of medians between two independent samples, both with the
//! sequential percentile bootstrap.

use crate::{
    bootstrap::{Bootstrap, BootstrapResult},
    statistic::{Mean, MedianDifference, Statistic},
};
use bootstats_core::Result;

// Re-export common bootstrap methods for convenience
pub use crate::bootstrap_methods::{BasicBootstrap, NormalBootstrap, PercentileBootstrap};
pub use crate::config::DEFAULT_REPLICATES as DEFAULT_RESAMPLES;

/// Fast number of resamples for quick estimates
pub const FAST_RESAMPLES: usize = 500;

/// High-precision number of resamples
pub const HIGH_PRECISION_RESAMPLES: usize = 10000;

fn percentile(confidence_level: f64, n_resamples: usize, seed: Option<u64>) -> Bootstrap {
    let bootstrap = Bootstrap::sequential()
        .with_replicates(n_resamples)
        .with_confidence_level(confidence_level);
    match seed {
        Some(seed) => bootstrap.with_seed(seed),
        None => bootstrap,
    }
}

/// Percentile bootstrap of the sample mean
///
/// # Example
/// ```rust
/// use bootstats_confidence::api::*;
///
/// let sample = [12.0, 15.5, 9.8, 14.1, 11.7, 13.3];
/// let result = bootstrap_mean(&sample, 0.95, DEFAULT_RESAMPLES, Some(7)).unwrap();
/// assert!(result.interval().contains(result.observed_statistic));
/// ```
pub fn bootstrap_mean(
    sample: &[f64],
    confidence_level: f64,
    n_resamples: usize,
    seed: Option<u64>,
) -> Result<BootstrapResult> {
    percentile(confidence_level, n_resamples, seed).run(sample, &Mean)
}

/// Percentile bootstrap of `median(second) - median(first)`
pub fn bootstrap_median_difference(
    first: &[f64],
    second: &[f64],
    confidence_level: f64,
    n_resamples: usize,
    seed: Option<u64>,
) -> Result<BootstrapResult> {
    percentile(confidence_level, n_resamples, seed).run_two_sample(first, second, &MedianDifference)
}

/// Percentile bootstrap of any one-sample statistic
pub fn bootstrap_statistic<S>(
    sample: &[f64],
    statistic: &S,
    confidence_level: f64,
    n_resamples: usize,
    seed: Option<u64>,
) -> Result<BootstrapResult>
where
    S: Statistic<f64> + ?Sized,
{
    percentile(confidence_level, n_resamples, seed).run(sample, statistic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bootstrap_mean() {
        let sample = [1.0, 2.0, 3.0, 4.0, 5.0];
        let result = bootstrap_mean(&sample, 0.95, FAST_RESAMPLES, Some(42)).unwrap();
        assert_relative_eq!(result.observed_statistic, 3.0);
        assert_eq!(result.replicate_count, FAST_RESAMPLES);
        assert!(result.ci_lower >= 1.0 && result.ci_upper <= 5.0);
    }

    #[test]
    fn test_bootstrap_median_difference() {
        let first = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let second = [4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let result = bootstrap_median_difference(&first, &second, 0.9, 1000, Some(3)).unwrap();
        assert_eq!(result.observed_statistic, 3.0);
        assert!(result.interval().contains(3.0));
    }

    #[test]
    fn test_bootstrap_statistic_matches_builder() {
        let sample = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0, 6.0];
        let max = |s: &[f64]| s.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let via_api = bootstrap_statistic(&sample, &max, 0.95, 200, Some(10)).unwrap();
        let via_builder = Bootstrap::sequential()
            .with_replicates(200)
            .with_seed(10)
            .run(&sample, &max)
            .unwrap();
        assert_eq!(via_api, via_builder);
    }

    #[test]
    fn test_invalid_level() {
        assert!(bootstrap_mean(&[1.0, 2.0], 1.5, 100, None).is_err());
    }
}

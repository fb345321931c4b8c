//! Bootstrap method implementations
//!
//! This module provides various bootstrap methods for constructing
//! confidence intervals from bootstrap distributions. Every method receives
//! the finite replicate values already sorted.

use crate::{estimator, ConfidenceInterval, ConfidenceLevel};
use bootstats_core::{QuantileInterpolation, Result};
use tracing::debug;

/// Bootstrap method for calculating confidence intervals
///
/// This trait defines how to construct a confidence interval from
/// bootstrap estimates. Different methods (percentile, basic, normal)
/// implement this trait.
pub trait BootstrapMethod: Clone + Send + Sync {
    /// Calculate confidence interval from a sorted bootstrap distribution
    fn calculate_interval(
        &self,
        sorted_estimates: &[f64],
        original_estimate: f64,
        confidence_level: ConfidenceLevel,
        interpolation: QuantileInterpolation,
    ) -> Result<ConfidenceInterval>;

    /// Method name for documentation
    fn name(&self) -> &'static str;
}

/// Percentile bootstrap method
///
/// The simplest bootstrap method. Uses the empirical percentiles of the
/// bootstrap distribution to construct the confidence interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileBootstrap;

impl BootstrapMethod for PercentileBootstrap {
    fn calculate_interval(
        &self,
        sorted_estimates: &[f64],
        original_estimate: f64,
        confidence_level: ConfidenceLevel,
        interpolation: QuantileInterpolation,
    ) -> Result<ConfidenceInterval> {
        let (lower, upper) =
            estimator::percentile_bounds(sorted_estimates, confidence_level, interpolation)?;

        Ok(ConfidenceInterval::new(
            lower,
            upper,
            original_estimate,
            confidence_level.value(),
        ))
    }

    fn name(&self) -> &'static str {
        "Percentile Bootstrap"
    }
}

/// Basic bootstrap method
///
/// Uses the reflection principle: if θ̂* is the bootstrap estimate and θ̂ is the
/// original estimate, then the interval is [2θ̂ - q_{1-α/2}, 2θ̂ - q_{α/2}]
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicBootstrap;

impl BootstrapMethod for BasicBootstrap {
    fn calculate_interval(
        &self,
        sorted_estimates: &[f64],
        original_estimate: f64,
        confidence_level: ConfidenceLevel,
        interpolation: QuantileInterpolation,
    ) -> Result<ConfidenceInterval> {
        let (q_lower, q_upper) =
            estimator::percentile_bounds(sorted_estimates, confidence_level, interpolation)?;

        Ok(ConfidenceInterval::new(
            2.0 * original_estimate - q_upper,
            2.0 * original_estimate - q_lower,
            original_estimate,
            confidence_level.value(),
        ))
    }

    fn name(&self) -> &'static str {
        "Basic Bootstrap"
    }
}

/// Normal-approximation bootstrap method
///
/// Centres a normal interval on the bias-corrected estimate:
/// `(θ̂ - bias) ± z_{1-α/2} · se*`, where `bias` and `se*` come from the
/// bootstrap distribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalBootstrap;

impl BootstrapMethod for NormalBootstrap {
    fn calculate_interval(
        &self,
        sorted_estimates: &[f64],
        original_estimate: f64,
        confidence_level: ConfidenceLevel,
        _interpolation: QuantileInterpolation,
    ) -> Result<ConfidenceInterval> {
        let se = estimator::standard_error(sorted_estimates)?;
        let bias = estimator::bias(sorted_estimates, original_estimate)?;
        let z = confidence_level.two_sided_z();
        let centre = original_estimate - bias;

        debug!(se, bias, z, "normal bootstrap interval");

        Ok(ConfidenceInterval::new(
            centre - z * se,
            centre + z * se,
            original_estimate,
            confidence_level.value(),
        ))
    }

    fn name(&self) -> &'static str {
        "Normal Bootstrap"
    }
}

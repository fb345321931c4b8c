//! Bootstrap run configuration

use crate::ConfidenceLevel;
use bootstats_core::{Error, QuantileInterpolation, Result};
use serde::{Deserialize, Serialize};

pub use crate::statistic::NonFinitePolicy;

/// Default number of bootstrap replicates
pub const DEFAULT_REPLICATES: usize = 2000;

/// Settings for one bootstrap run
///
/// Deserialises from any serde format; missing fields take their defaults.
///
/// ```rust
/// use bootstats_confidence::BootstrapConfig;
///
/// let config = BootstrapConfig {
///     replicate_count: 500,
///     seed: Some(42),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Number of replicates B, at least 1
    pub replicate_count: usize,
    /// Two-sided confidence level in (0, 1)
    pub confidence_level: f64,
    /// Master seed; drawn from entropy and logged when unset
    pub seed: Option<u64>,
    /// Order-statistic interpolation used for percentile bounds
    pub quantile_interpolation: QuantileInterpolation,
    /// Handling of replicates whose statistic is NaN or infinite
    pub non_finite_policy: NonFinitePolicy,
    /// Hypothesised value of the statistic for the Wald test
    pub null_value: f64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            replicate_count: DEFAULT_REPLICATES,
            confidence_level: 0.95,
            seed: None,
            quantile_interpolation: QuantileInterpolation::default(),
            non_finite_policy: NonFinitePolicy::default(),
            null_value: 0.0,
        }
    }
}

impl BootstrapConfig {
    /// Check every setting, returning the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.replicate_count == 0 {
            return Err(Error::InvalidParameter(
                "Number of replicates must be at least 1".to_string(),
            ));
        }
        ConfidenceLevel::new(self.confidence_level)?;
        if !self.null_value.is_finite() {
            return Err(Error::InvalidParameter(format!(
                "Null value must be finite, got {}",
                self.null_value
            )));
        }
        Ok(())
    }

    /// Validated confidence level
    pub fn level(&self) -> Result<ConfidenceLevel> {
        ConfidenceLevel::new(self.confidence_level)
    }
}

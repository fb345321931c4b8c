//! Interval and level types shared by the bootstrap and the parametric tests

use bootstats_core::{math::distributions::normal, Error, Result};
use std::fmt;

/// Interval estimate around a point estimate
///
/// One-sided intervals carry an infinite bound (or the natural limit of the
/// parameter, such as 1 for a correlation) on the open side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub estimate: f64,
    /// Nominal coverage, e.g. 0.95
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    pub fn new(lower: f64, upper: f64, estimate: f64, confidence_level: f64) -> Self {
        Self {
            lower,
            upper,
            estimate,
            confidence_level,
        }
    }

    /// `upper - lower`; infinite for one-sided intervals
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Half the width
    pub fn margin_of_error(&self) -> f64 {
        self.width() / 2.0
    }

    /// Whether `value` lies inside the closed interval
    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// Whether both bounds are finite
    pub fn is_bounded(&self) -> bool {
        self.lower.is_finite() && self.upper.is_finite()
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}% CI: [{:.4}, {:.4}], estimate: {:.4}",
            self.confidence_level * 100.0,
            self.lower,
            self.upper,
            self.estimate
        )
    }
}

/// Confidence level strictly inside (0, 1)
///
/// ```rust
/// use bootstats_confidence::ConfidenceLevel;
///
/// let level = ConfidenceLevel::new(0.95).unwrap();
/// assert!((level.two_sided_z() - 1.959964).abs() < 1e-6);
/// assert!(ConfidenceLevel::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    pub const NINETY: Self = Self(0.90);
    pub const NINETY_FIVE: Self = Self(0.95);
    pub const NINETY_NINE: Self = Self(0.99);

    pub fn new(level: f64) -> Result<Self> {
        // NaN fails both comparisons
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(Error::invalid_confidence_level(level))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// `1 - level`
    pub fn alpha(&self) -> f64 {
        1.0 - self.0
    }

    /// Probability left in each tail of a two-sided interval, `alpha / 2`
    pub fn tail_probability(&self) -> f64 {
        self.alpha() / 2.0
    }

    /// Quantile probabilities bounding a two-sided interval
    pub fn two_sided_probabilities(&self) -> (f64, f64) {
        let tail = self.tail_probability();
        (tail, 1.0 - tail)
    }

    /// Standard normal critical value for a two-sided interval, `z_{1 - alpha/2}`
    pub fn two_sided_z(&self) -> f64 {
        normal::quantile(1.0 - self.tail_probability())
    }

    /// Standard normal critical value for a one-sided bound, `z_{1 - alpha}`
    pub fn one_sided_z(&self) -> f64 {
        normal::quantile(self.0)
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self::NINETY_FIVE
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = Error;

    fn try_from(level: f64) -> Result<Self> {
        Self::new(level)
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

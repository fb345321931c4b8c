//! Empirical quantiles of sorted data
//!
//! Bootstrap percentile intervals are read off the sorted replicate values.
//! For small replicate counts the interpolation rule moves the bounds
//! noticeably, so the rule is an explicit, serialisable choice rather than
//! an implementation detail.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Rule for reading a quantile between two order statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantileInterpolation {
    /// Linear interpolation between order statistics.
    ///
    /// For `m` sorted values and probability `p` the position is
    /// `h = (m - 1) p`, and the quantile is
    /// `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.
    /// This is Hyndman & Fan definition 7.
    #[default]
    Linear,
}

impl QuantileInterpolation {
    /// Quantile `p` of already sorted, finite data
    pub fn quantile_sorted(&self, sorted: &[f64], p: f64) -> Result<f64> {
        if sorted.is_empty() {
            return Err(Error::empty_input("quantile"));
        }
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::InvalidParameter(format!(
                "Quantile {p} must be in [0, 1]"
            )));
        }
        debug_assert!(
            sorted.windows(2).all(|w| w[0] <= w[1]),
            "quantile input must be sorted"
        );

        match self {
            Self::Linear => {
                let h = (sorted.len() - 1) as f64 * p;
                let lo = h.floor() as usize;
                let hi = (lo + 1).min(sorted.len() - 1);
                let frac = h - lo as f64;
                let q = sorted[lo] + frac * (sorted[hi] - sorted[lo]);
                // Rounding must not push the result outside its segment
                Ok(q.clamp(sorted[lo], sorted[hi]))
            }
        }
    }

    /// Name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
        }
    }
}

/// Sort a copy of `values`, dropping NaN and infinite entries
///
/// Returns the sorted finite values and the number of entries dropped.
pub fn sorted_finite(values: &[f64]) -> (Vec<f64>, usize) {
    let mut finite: Vec<f64> = values.iter().copied().filter(|x| x.is_finite()).collect();
    let dropped = values.len() - finite.len();
    finite.sort_by(f64::total_cmp);
    (finite, dropped)
}

/// Convenience wrapper: linear-interpolated quantile of unsorted data
pub fn quantile(values: &[f64], p: f64) -> Result<f64> {
    let (sorted, _) = sorted_finite(values);
    QuantileInterpolation::Linear.quantile_sorted(&sorted, p)
}

//! Descriptive statistics shared by the bootstrap and test crates
//!
//! All functions treat their input as a sample: variance and standard
//! deviation use the `n - 1` denominator.

use crate::{Error, Result};

/// Arithmetic mean
pub fn mean(sample: &[f64]) -> Result<f64> {
    if sample.is_empty() {
        return Err(Error::empty_input("mean"));
    }
    Ok(sample.iter().sum::<f64>() / sample.len() as f64)
}

/// Sample variance with denominator `n - 1`
pub fn variance(sample: &[f64]) -> Result<f64> {
    if sample.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: sample.len(),
        });
    }
    let m = mean(sample)?;
    let ss = sample.iter().map(|&x| (x - m).powi(2)).sum::<f64>();
    Ok(ss / (sample.len() - 1) as f64)
}

/// Sample standard deviation with denominator `n - 1`
pub fn std_dev(sample: &[f64]) -> Result<f64> {
    variance(sample).map(f64::sqrt)
}

/// Standard error of the mean, `sd / sqrt(n)`
pub fn standard_error_of_mean(sample: &[f64]) -> Result<f64> {
    Ok(std_dev(sample)? / (sample.len() as f64).sqrt())
}

/// Median of a sample
///
/// Uses selection on a scratch copy, so the input is left untouched. For an
/// even number of observations the two middle order statistics are averaged.
pub fn median(sample: &[f64]) -> Result<f64> {
    let mut scratch = sample.to_vec();
    median_in_place(&mut scratch)
}

/// Median that reorders `data` instead of copying it
pub fn median_in_place(data: &mut [f64]) -> Result<f64> {
    let n = data.len();
    if n == 0 {
        return Err(Error::empty_input("median"));
    }
    if data.iter().any(|x| x.is_nan()) {
        return Err(Error::non_finite("median input"));
    }

    let mid = n / 2;
    let (lower, upper, _) = data.select_nth_unstable_by(mid, f64::total_cmp);
    let upper = *upper;
    if n % 2 == 1 {
        return Ok(upper);
    }
    // The lower half is unordered; its maximum is the other middle value.
    let below = lower.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Ok((below + upper) / 2.0)
}

/// Element-wise differences `b[i] - a[i]` of two paired samples
pub fn paired_differences(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    if a.len() != b.len() {
        return Err(Error::size_mismatch(a.len(), b.len(), "paired samples"));
    }
    Ok(a.iter().zip(b).map(|(x, y)| y - x).collect())
}

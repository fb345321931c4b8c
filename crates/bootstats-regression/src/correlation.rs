//! Pearson correlation and its significance test

use bootstats_confidence::{ConfidenceInterval, ConfidenceLevel};
use bootstats_core::{Error, Result};
use bootstats_hypothesis::{Alternative, TestResult};
use tracing::debug;

/// Calculate Pearson correlation coefficient
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::size_mismatch(x.len(), y.len(), "correlation"));
    }

    if x.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: x.len(),
        });
    }

    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(Error::InvalidInput(
            "Correlation input contains NaN or infinite values".to_string(),
        ));
    }

    let n = x.len() as f64;

    // Calculate means
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    // Calculate correlation components
    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;

    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;

        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();

    if denominator == 0.0 {
        return Err(Error::zero_variance("correlation"));
    }

    Ok((numerator / denominator).clamp(-1.0, 1.0))
}

/// Correlation estimate together with its test
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationTest {
    /// Sample correlation r
    pub estimate: f64,
    /// t statistic `r sqrt((n - 2) / (1 - r^2))` on `n - 2` degrees of freedom,
    /// with the Fisher-z interval for the correlation when `n > 3`
    pub test: TestResult,
}

/// Test of zero correlation between `x` and `y`
///
/// ```rust
/// use bootstats_hypothesis::Alternative;
/// use bootstats_regression::correlation_test;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let y = [1.2, 1.9, 3.4, 3.9, 5.3, 5.8];
/// let result = correlation_test(&x, &y, Alternative::TwoSided, 0.95).unwrap();
/// assert!(result.estimate > 0.95);
/// assert!(result.test.p_value < 0.01);
/// ```
pub fn correlation_test(
    x: &[f64],
    y: &[f64],
    alternative: Alternative,
    confidence_level: f64,
) -> Result<CorrelationTest> {
    let level = ConfidenceLevel::new(confidence_level)?;
    if x.len() < 3 {
        return Err(Error::InsufficientData {
            expected: 3,
            actual: x.len(),
        });
    }
    let r = pearson_correlation(x, y)?;
    let n = x.len() as f64;
    let df = n - 2.0;

    let denominator = 1.0 - r * r;
    let t = if denominator > 0.0 {
        r * (df / denominator).sqrt()
    } else {
        r.signum() * f64::INFINITY
    };
    let p_value = alternative.students_t_p_value(t, df)?;

    let ci = (x.len() > 3).then(|| fisher_interval(r, n, alternative, level));

    debug!(r, t, df, p_value, "correlation test");

    Ok(CorrelationTest {
        estimate: r,
        test: TestResult {
            statistic: t,
            p_value,
            ci,
            alternative,
            df: Some(df),
        },
    })
}

fn fisher_interval(r: f64, n: f64, alternative: Alternative, level: ConfidenceLevel) -> ConfidenceInterval {
    let z = r.atanh();
    let sigma = 1.0 / (n - 3.0).sqrt();
    let (lower, upper) = match alternative {
        Alternative::TwoSided => {
            let q = level.two_sided_z();
            ((z - q * sigma).tanh(), (z + q * sigma).tanh())
        }
        Alternative::Greater => ((z - level.one_sided_z() * sigma).tanh(), 1.0),
        Alternative::Less => (-1.0, (z + level.one_sided_z() * sigma).tanh()),
    };
    ConfidenceInterval::new(lower, upper, r, level.value())
}

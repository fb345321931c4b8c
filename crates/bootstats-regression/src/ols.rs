//! Ordinary least squares
//!
//! Solves the normal equations `X'X b = X'y` with a Cholesky factorisation,
//! falling back to an SVD pseudo-inverse if the factorisation fails. A
//! design whose columns are linearly dependent has no unique solution and is
//! rejected before solving.
//!
//! Inference assumes homoscedastic normal errors: standard errors come from
//! `s^2 (X'X)^-1` with `s^2 = RSS / (n - p)`, and t statistics are compared
//! with Student's t on `n - p` degrees of freedom.

use crate::{model::ResolvedModel, Dataset, ModelSpec};
use bootstats_confidence::{ConfidenceInterval, ConfidenceLevel};
use bootstats_core::{
    math::distributions::{fisher_f, students_t},
    Error, Result,
};
use nalgebra::{DMatrix, DVector};
use tracing::{debug, instrument, warn};

/// Relative size below which a singular value counts as zero
const RANK_TOLERANCE: f64 = 1e-10;

/// One fitted coefficient
#[derive(Debug, Clone, PartialEq)]
pub struct Coefficient {
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
    /// Two-sided p-value on `df_residual` degrees of freedom
    pub p_value: f64,
}

/// Fitted linear model
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub spec: ModelSpec,
    pub coefficients: Vec<Coefficient>,
    pub fitted: Vec<f64>,
    pub residuals: Vec<f64>,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    /// Residual standard error `sqrt(RSS / (n - p))`
    pub residual_standard_error: f64,
    pub df_residual: usize,
    /// Overall F statistic; `None` for a model without slopes
    pub f_statistic: Option<f64>,
    pub f_p_value: Option<f64>,
}

impl OlsFit {
    pub fn coefficient(&self, name: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.name == name)
    }

    pub fn estimates(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.estimate).collect()
    }

    pub fn n_obs(&self) -> usize {
        self.fitted.len()
    }

    /// Residual sum of squares
    pub fn rss(&self) -> f64 {
        self.residuals.iter().map(|r| r * r).sum()
    }

    /// t-based confidence intervals for every coefficient
    pub fn confidence_intervals(&self, confidence_level: f64) -> Result<Vec<ConfidenceInterval>> {
        let level = ConfidenceLevel::new(confidence_level)?;
        let q = students_t::quantile(1.0 - level.tail_probability(), self.df_residual as f64)?;
        Ok(self
            .coefficients
            .iter()
            .map(|c| {
                ConfidenceInterval::new(
                    c.estimate - q * c.std_error,
                    c.estimate + q * c.std_error,
                    c.estimate,
                    level.value(),
                )
            })
            .collect())
    }

    /// Predictions for the rows of `data`, which must hold every predictor
    pub fn predict(&self, data: &Dataset) -> Result<Vec<f64>> {
        let predictors = self
            .spec
            .predictors
            .iter()
            .map(|name| data.column(name))
            .collect::<Result<Vec<_>>>()?;
        let (intercept, slopes) = if self.spec.intercept {
            (self.coefficients[0].estimate, &self.coefficients[1..])
        } else {
            (0.0, &self.coefficients[..])
        };
        Ok((0..data.n_rows())
            .map(|row| {
                intercept
                    + slopes
                        .iter()
                        .zip(&predictors)
                        .map(|(c, column)| c.estimate * column[row])
                        .sum::<f64>()
            })
            .collect())
    }
}

/// Fit `spec` to `data` by least squares
#[instrument(skip(data), fields(n = data.n_rows()))]
pub fn fit_ols(spec: &ModelSpec, data: &Dataset) -> Result<OlsFit> {
    let model = spec.resolve(data)?;
    let n = model.n_obs();
    let p = model.n_terms();

    if n <= p {
        return Err(Error::InsufficientData {
            expected: p + 1,
            actual: n,
        });
    }
    check_finite(spec, &model)?;

    let design = DMatrix::from_fn(n, p, |i, j| model.design_value(i, j));
    let y = DVector::from_column_slice(model.outcome);

    check_rank(&design)?;

    let xtx = design.tr_mul(&design);
    let xty = design.tr_mul(&y);
    let (beta, xtx_inv) = solve_normal_equations(xtx, &xty)?;

    let fitted = &design * &beta;
    let residuals = &y - &fitted;
    let rss = residuals.norm_squared();
    let df_residual = n - p;
    let sigma2 = rss / df_residual as f64;

    if sigma2 == 0.0 {
        warn!("residuals are all zero, the fit is exact and standard errors vanish");
    }

    let coefficients = spec
        .term_names()
        .into_iter()
        .enumerate()
        .map(|(j, name)| {
            let estimate = beta[j];
            let std_error = (sigma2 * xtx_inv[(j, j)]).max(0.0).sqrt();
            let t_value = ratio(estimate, std_error);
            let p_value = students_t::two_sided_p_value(t_value, df_residual as f64)?;
            Ok(Coefficient {
                name: name.to_string(),
                estimate,
                std_error,
                t_value,
                p_value,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Total sum of squares about the mean, or about zero without an intercept
    let tss = if model.intercept {
        let mean = y.mean();
        y.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
    } else {
        y.norm_squared()
    };
    let intercept_df = usize::from(model.intercept);
    let r_squared = if tss > 0.0 { 1.0 - rss / tss } else { f64::NAN };
    let adj_r_squared =
        1.0 - (1.0 - r_squared) * (n - intercept_df) as f64 / df_residual as f64;

    let slope_df = p - intercept_df;
    let (f_statistic, f_p_value) = if slope_df > 0 && tss > 0.0 {
        let f = ratio((tss - rss) / slope_df as f64, sigma2);
        let f_p = fisher_f::sf(f, slope_df as f64, df_residual as f64)?;
        (Some(f), Some(f_p))
    } else {
        (None, None)
    };

    debug!(r_squared, sigma = sigma2.sqrt(), df_residual, "least squares fit");

    Ok(OlsFit {
        spec: spec.clone(),
        coefficients,
        fitted: fitted.as_slice().to_vec(),
        residuals: residuals.as_slice().to_vec(),
        r_squared,
        adj_r_squared,
        residual_standard_error: sigma2.sqrt(),
        df_residual,
        f_statistic,
        f_p_value,
    })
}

/// Quotient that is infinite rather than NaN for a zero denominator
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else if numerator == 0.0 {
        0.0
    } else {
        numerator.signum() * f64::INFINITY
    }
}

fn check_finite(spec: &ModelSpec, model: &ResolvedModel<'_>) -> Result<()> {
    let columns = std::iter::once((spec.outcome.as_str(), model.outcome))
        .chain(spec.predictors.iter().map(String::as_str).zip(model.predictors.iter().copied()));
    for (name, values) in columns {
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "Column '{name}' contains NaN or infinite values"
            )));
        }
    }
    Ok(())
}

fn check_rank(design: &DMatrix<f64>) -> Result<()> {
    let singular_values = design.clone().svd(false, false).singular_values;
    let largest = singular_values.iter().copied().fold(0.0, f64::max);
    let smallest = singular_values.iter().copied().fold(f64::INFINITY, f64::min);
    if largest == 0.0 || smallest <= largest * RANK_TOLERANCE {
        return Err(Error::NumericDegeneracy(
            "Design matrix is singular: predictors are linearly dependent".to_string(),
        ));
    }
    Ok(())
}

fn solve_normal_equations(
    xtx: DMatrix<f64>,
    xty: &DVector<f64>,
) -> Result<(DVector<f64>, DMatrix<f64>)> {
    match xtx.clone().cholesky() {
        Some(chol) => Ok((chol.solve(xty), chol.inverse())),
        None => {
            debug!("Cholesky factorisation failed, using SVD");
            let svd = xtx.svd(true, true);
            let inverse = svd.pseudo_inverse(RANK_TOLERANCE).map_err(|e| {
                Error::Computation(format!("Failed to solve normal equations: {e}"))
            })?;
            let beta = &inverse * xty;
            Ok((beta, inverse))
        }
    }
}

//! Result types shared by the parametric tests

use bootstats_confidence::ConfidenceInterval;
use bootstats_core::{
    math::distributions::{normal, students_t},
    Result,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of the alternative hypothesis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alternative {
    /// Parameter differs from the null value
    #[default]
    TwoSided,
    /// Parameter exceeds the null value
    Greater,
    /// Parameter is below the null value
    Less,
}

impl Alternative {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TwoSided => "two_sided",
            Self::Greater => "greater",
            Self::Less => "less",
        }
    }

    /// p-value of a standard normal statistic under this alternative
    pub fn normal_p_value(&self, z: f64) -> f64 {
        match self {
            Self::TwoSided => normal::two_sided_p_value(z),
            Self::Greater => normal::sf(z),
            Self::Less => normal::cdf(z),
        }
    }

    /// p-value of a Student t statistic with `df` degrees of freedom
    pub fn students_t_p_value(&self, t: f64, df: f64) -> Result<f64> {
        match self {
            Self::TwoSided => students_t::two_sided_p_value(t, df),
            Self::Greater => students_t::cdf(-t, df),
            Self::Less => students_t::cdf(t, df),
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a parametric hypothesis test
#[derive(Debug, Clone, PartialEq)]
pub struct TestResult {
    /// Test statistic (z or chi-square)
    pub statistic: f64,
    pub p_value: f64,
    /// Interval for the tested parameter, when the test defines one
    pub ci: Option<ConfidenceInterval>,
    pub alternative: Alternative,
    /// Degrees of freedom of the reference distribution, if it has any
    pub df: Option<f64>,
}

impl TestResult {
    /// Whether the null hypothesis is rejected at level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }

    /// Lower interval bound, if an interval was computed
    pub fn ci_lower(&self) -> Option<f64> {
        self.ci.map(|ci| ci.lower)
    }

    /// Upper interval bound, if an interval was computed
    pub fn ci_upper(&self) -> Option<f64> {
        self.ci.map(|ci| ci.upper)
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "statistic = {:.4}", self.statistic)?;
        if let Some(df) = self.df {
            write!(f, ", df = {df}")?;
        }
        write!(f, ", p-value = {:.4} ({})", self.p_value, self.alternative)?;
        if let Some(ci) = &self.ci {
            write!(f, "; {ci}")?;
        }
        Ok(())
    }
}

//! Model specification
//!
//! A model names its outcome and its predictors explicitly:
//!
//! ```rust
//! use bootstats_regression::ModelSpec;
//!
//! let spec = ModelSpec::new("weight").predictor("height").predictor("age");
//! assert_eq!(spec.term_names(), vec!["(Intercept)", "height", "age"]);
//! ```

use crate::Dataset;
use bootstats_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Name of the intercept term in fitted models
pub const INTERCEPT: &str = "(Intercept)";

/// Outcome and ordered predictors of a linear model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub outcome: String,
    #[serde(default)]
    pub predictors: Vec<String>,
    #[serde(default = "default_intercept")]
    pub intercept: bool,
}

fn default_intercept() -> bool {
    true
}

impl ModelSpec {
    /// Intercept-only model for `outcome`
    pub fn new(outcome: impl Into<String>) -> Self {
        Self {
            outcome: outcome.into(),
            predictors: Vec::new(),
            intercept: true,
        }
    }

    /// Append a predictor
    pub fn predictor(mut self, name: impl Into<String>) -> Self {
        self.predictors.push(name.into());
        self
    }

    /// Append several predictors in order
    pub fn predictors<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predictors.extend(names.into_iter().map(Into::into));
        self
    }

    /// Fit through the origin
    pub fn without_intercept(mut self) -> Self {
        self.intercept = false;
        self
    }

    /// Names of the coefficients, intercept first
    pub fn term_names(&self) -> Vec<&str> {
        let intercept = self.intercept.then_some(INTERCEPT);
        intercept
            .into_iter()
            .chain(self.predictors.iter().map(String::as_str))
            .collect()
    }

    /// Number of coefficients
    pub fn n_terms(&self) -> usize {
        self.predictors.len() + usize::from(self.intercept)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_terms() == 0 {
            return Err(Error::InvalidInput(
                "Model has neither an intercept nor predictors".to_string(),
            ));
        }
        for (i, name) in self.predictors.iter().enumerate() {
            if *name == self.outcome {
                return Err(Error::InvalidInput(format!(
                    "Outcome '{name}' cannot also be a predictor"
                )));
            }
            if self.predictors[..i].contains(name) {
                return Err(Error::InvalidInput(format!("Predictor '{name}' listed twice")));
            }
        }
        Ok(())
    }

    /// Look up the outcome and predictor columns in `data`
    pub fn resolve<'a>(&self, data: &'a Dataset) -> Result<ResolvedModel<'a>> {
        self.validate()?;
        let outcome = data.column(&self.outcome)?;
        let predictors = self
            .predictors
            .iter()
            .map(|name| data.column(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(ResolvedModel {
            outcome,
            predictors,
            intercept: self.intercept,
        })
    }
}

/// A model whose variables have been found in a dataset
#[derive(Debug, Clone)]
pub struct ResolvedModel<'a> {
    pub outcome: &'a [f64],
    pub predictors: Vec<&'a [f64]>,
    pub intercept: bool,
}

impl ResolvedModel<'_> {
    pub fn n_obs(&self) -> usize {
        self.outcome.len()
    }

    /// Value of design column `term` in row `row`
    pub fn design_value(&self, row: usize, term: usize) -> f64 {
        match (self.intercept, term) {
            (true, 0) => 1.0,
            (true, t) => self.predictors[t - 1][row],
            (false, t) => self.predictors[t][row],
        }
    }

    pub fn n_terms(&self) -> usize {
        self.predictors.len() + usize::from(self.intercept)
    }
}

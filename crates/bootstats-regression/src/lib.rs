//! Correlation and linear regression
//!
//! Variables are referred to by name through an explicit [`ModelSpec`]
//! (outcome plus ordered predictors) and resolved against a [`Dataset`] of
//! named numeric columns.
//!
//! # Example
//!
//! ```rust
//! use bootstats_regression::{fit_ols, Dataset, ModelSpec};
//!
//! let data = Dataset::new()
//!     .with_column("dose", vec![1.0, 2.0, 3.0, 4.0, 5.0])
//!     .unwrap()
//!     .with_column("response", vec![2.2, 3.9, 6.1, 8.0, 9.8])
//!     .unwrap();
//!
//! let fit = fit_ols(&ModelSpec::new("response").predictor("dose"), &data).unwrap();
//! let slope = fit.coefficient("dose").unwrap();
//! assert!((slope.estimate - 1.93).abs() < 1e-9);
//! assert!((fit.coefficient("(Intercept)").unwrap().estimate - 0.21).abs() < 1e-9);
//! assert!(fit.r_squared > 0.99);
//! ```

mod correlation;
mod dataset;
pub mod model;
mod ols;

pub use correlation::{correlation_test, pearson_correlation, CorrelationTest};
pub use dataset::Dataset;
pub use model::{ModelSpec, INTERCEPT};
pub use ols::{fit_ols, Coefficient, OlsFit};

//! Core types for bootstrap and hypothesis-test computations
//!
//! This crate provides the pieces every other bootstats crate builds on:
//!
//! - [`Error`] / [`Result`]: one error type with an [`ErrorKind`]
//!   classification (invalid input, numeric degeneracy, computation failure)
//! - [`math::distributions`]: normal, chi-square and Student-t tail
//!   probabilities backed by `statrs`
//! - [`descriptive`]: mean, variance, standard deviation, median
//! - [`quantile`]: empirical quantiles with an explicit interpolation rule
//! - [`execution`]: sequential and (with the `parallel` feature) rayon
//!   engines for independent batch work
//!
//! # Example
//!
//! ```rust
//! use bootstats_core::{descriptive, QuantileInterpolation};
//!
//! let data = vec![7.0, 1.0, 4.0, 3.0, 9.0];
//! let mean = descriptive::mean(&data).unwrap();
//! let median = descriptive::median(&data).unwrap();
//!
//! let mut sorted = data.clone();
//! sorted.sort_by(f64::total_cmp);
//! let q90 = QuantileInterpolation::Linear.quantile_sorted(&sorted, 0.9).unwrap();
//!
//! assert_eq!(mean, 4.8);
//! assert_eq!(median, 4.0);
//! assert!(q90 > 7.0 && q90 < 9.0);
//! ```

pub mod descriptive;
pub mod error;
pub mod execution;
pub mod math;
pub mod quantile;

// Re-export core types
pub use error::{Error, ErrorKind, Result};

pub use execution::{sequential, ExecutionEngine, ExecutionStrategy, SequentialEngine};
#[cfg(feature = "parallel")]
pub use execution::{parallel, ParallelEngine};

pub use quantile::{sorted_finite, QuantileInterpolation};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::descriptive::{mean, median, std_dev, variance};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::execution::{sequential, ExecutionEngine, ExecutionStrategy, SequentialEngine};
    #[cfg(feature = "parallel")]
    pub use crate::execution::{parallel, ParallelEngine};
    pub use crate::math::distributions::normal;
    pub use crate::quantile::QuantileInterpolation;
}

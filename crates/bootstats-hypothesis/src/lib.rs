//! Parametric hypothesis tests
//!
//! - **z-tests** ([`ZTest`]): one-sample, paired and two-sample tests of
//!   means with known or plug-in standard deviations, for two-sided and
//!   one-sided alternatives, with a matching confidence interval
//! - **Chi-square tests**: goodness of fit ([`goodness_of_fit`]) and
//!   independence in contingency tables ([`independence`]) with optional
//!   Yates continuity correction for 2x2 tables
//!
//! # Example
//!
//! ```rust
//! use bootstats_hypothesis::{independence, ContingencyTable};
//!
//! let table = ContingencyTable::from_rows(&[[12.0, 5.0], [3.0, 9.0]]).unwrap();
//! let plain = independence(&table, false).unwrap();
//! let corrected = independence(&table, true).unwrap();
//!
//! assert!(corrected.p_value() > plain.p_value());
//! ```

mod chi_square;
mod types;
mod z_test;

pub use chi_square::{
    goodness_of_fit, goodness_of_fit_uniform, independence, ChiSquareResult, ContingencyTable,
};
pub use types::{Alternative, TestResult};
pub use z_test::{SampleSummary, Sigma, ZTest};

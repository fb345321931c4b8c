//! # bootstats
//!
//! Reproducible statistical inference: bootstrap confidence intervals with
//! Wald tests, z-tests, chi-square tests, Pearson correlation and ordinary
//! least squares.
//!
//! ## Crates
//!
//! - [`core`]: error type, distributions, descriptive statistics, execution
//!   engines
//! - [`confidence`]: resampling and the bootstrap orchestrator
//! - [`hypothesis`]: z-tests and chi-square tests
//! - [`regression`]: correlation tests and least squares on named columns
//!
//! ## Quick start
//!
//! ```rust
//! use bootstats::prelude::*;
//!
//! let before = [10.0, 12.0, 15.0, 20.0, 7.0, 11.0, 15.0, 18.0];
//! let after = [11.0, 9.0, 14.0, 18.0, 12.0, 10.0, 9.0, 17.0];
//!
//! // Parametric paired test on the differences after - before
//! let z = ZTest::new().paired(&before, &after, Sigma::Estimated).unwrap();
//! assert!(z.p_value > 0.05);
//!
//! // Bootstrap of the mean difference, reproducible through the seed
//! let pairs: Vec<(f64, f64)> = before.iter().copied().zip(after.iter().copied()).collect();
//! let result = Bootstrap::sequential()
//!     .with_replicates(500)
//!     .with_seed(42)
//!     .run_paired(&pairs, &PairedMeanDifference)
//!     .unwrap();
//! assert_eq!(result.observed_statistic, -1.0);
//! assert!(result.ci_lower < result.ci_upper);
//! ```

pub use bootstats_confidence as confidence;
pub use bootstats_core as core;
pub use bootstats_hypothesis as hypothesis;
pub use bootstats_regression as regression;

pub use bootstats_core::{Error, ErrorKind, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use bootstats_core::prelude::*;

    pub use bootstats_confidence::{
        fallible, BasicBootstrap, Bootstrap, BootstrapConfig, BootstrapMethod, BootstrapResult,
        ConfidenceInterval, ConfidenceLevel, Mean, MeanDifference, Median, MedianDifference,
        NonFinitePolicy, NormalBootstrap, PairedMeanDifference, PercentileBootstrap, Statistic,
        TwoSampleStatistic,
    };

    pub use bootstats_hypothesis::{
        goodness_of_fit, independence, Alternative, ContingencyTable, Sigma, TestResult, ZTest,
    };

    pub use bootstats_regression::{correlation_test, fit_ols, Dataset, ModelSpec};
}

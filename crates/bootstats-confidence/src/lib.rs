//! Bootstrap confidence intervals and Wald tests
//!
//! This crate implements the nonparametric bootstrap for arbitrary
//! statistics:
//!
//! - **Resampling**: indices drawn uniformly with replacement, one ChaCha8
//!   stream per replicate so seeded runs are reproducible on any engine
//! - **Statistics**: closures or the built-in [`Mean`], [`Median`],
//!   [`PairedMeanDifference`], [`MeanDifference`], [`MedianDifference`]
//! - **Intervals**: percentile (default), basic and normal bootstrap methods
//! - **Tests**: Wald z statistic and two-sided p-value from the bootstrap
//!   standard error
//!
//! # Examples
//!
//! ## One-sample bootstrap
//!
//! ```rust
//! use bootstats_confidence::{Bootstrap, Median};
//!
//! let sample = [3.1, 4.7, 2.2, 5.9, 4.4, 3.8, 6.1, 2.9, 4.0];
//! let result = Bootstrap::sequential()
//!     .with_replicates(1000)
//!     .with_confidence_level(0.90)
//!     .with_seed(2024)
//!     .run(&sample, &Median)
//!     .unwrap();
//!
//! println!("{}", result.interval());
//! assert_eq!(result.observed_statistic, 4.0);
//! ```
//!
//! ## Custom statistic with a different interval method
//!
//! ```rust
//! use bootstats_confidence::{BasicBootstrap, Bootstrap};
//!
//! let sample = [10.0, 12.0, 9.0, 15.0, 11.0, 14.0];
//! let range = |s: &[f64]| {
//!     let max = s.iter().copied().fold(f64::NEG_INFINITY, f64::max);
//!     let min = s.iter().copied().fold(f64::INFINITY, f64::min);
//!     max - min
//! };
//!
//! let result = Bootstrap::sequential()
//!     .with_method(BasicBootstrap)
//!     .with_replicates(500)
//!     .with_seed(1)
//!     .run(&sample, &range)
//!     .unwrap();
//! assert_eq!(result.observed_statistic, 6.0);
//! ```

pub mod api;
mod bootstrap;
mod bootstrap_methods;
pub mod config;
pub mod estimator;
pub mod resample;
mod statistic;
mod types;

// Re-exports
pub use api::{
    bootstrap_mean, bootstrap_median_difference, bootstrap_statistic, DEFAULT_RESAMPLES,
    FAST_RESAMPLES, HIGH_PRECISION_RESAMPLES,
};
pub use bootstrap::{Bootstrap, BootstrapResult};
pub use bootstrap_methods::{BasicBootstrap, BootstrapMethod, NormalBootstrap, PercentileBootstrap};
pub use config::{BootstrapConfig, DEFAULT_REPLICATES};
pub use estimator::{wald_test, WaldTest};
pub use resample::{replicate_rng, ReplicateRng, Resampler};
pub use statistic::{
    fallible, Fallible, Mean, MeanDifference, Median, MedianDifference, NonFinitePolicy,
    PairedMeanDifference, Statistic, TwoSampleStatistic,
};
pub use types::{ConfidenceInterval, ConfidenceLevel};

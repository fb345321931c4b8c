//! Error types for bootstrap and hypothesis-test computations
//!
//! Provides a unified error type for all bootstats crates.

use thiserror::Error;

/// Core error type for statistical operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Two inputs that must agree in shape do not
    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// A named column was not found in a dataset
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// The input is well formed but the requested quantity is undefined
    /// (zero variance, singular matrix, too few finite replicates)
    #[error("Numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Threading or parallelization error
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`]
///
/// Callers that only care about *why* something failed (bad input, a
/// degenerate quantity, or a failed evaluation) match on this instead of the
/// individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NumericDegeneracy,
    Computation,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter(_)
            | Self::InvalidInput(_)
            | Self::InsufficientData { .. }
            | Self::DimensionMismatch { .. }
            | Self::UnknownColumn(_) => ErrorKind::InvalidInput,
            Self::NumericDegeneracy(_) => ErrorKind::NumericDegeneracy,
            Self::Computation(_) | Self::Execution(_) | Self::Other(_) => ErrorKind::Computation,
        }
    }

    /// Create an error for empty input
    pub fn empty_input(operation: &str) -> Self {
        Self::InvalidInput(format!("{operation} requires a non-empty sample"))
    }

    /// Create an error for a confidence level outside (0, 1)
    pub fn invalid_confidence_level(level: f64) -> Self {
        Self::InvalidParameter(format!("Confidence level {level} must be in (0, 1)"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::DimensionMismatch {
            context: context.to_string(),
            expected,
            actual,
        }
    }

    /// Create an error for NaN/Inf values
    pub fn non_finite(context: &str) -> Self {
        Self::NumericDegeneracy(format!("{context} contains NaN or infinite values"))
    }

    /// Create an error for a quantity whose denominator vanished
    pub fn zero_variance(context: &str) -> Self {
        Self::NumericDegeneracy(format!("{context}: variance is zero"))
    }
}

//! Pearson chi-square tests
//!
//! Goodness of fit of observed counts to hypothesised probabilities, and
//! independence of the two classifications of a contingency table. Both
//! report the expected counts next to the test result; expected counts
//! below 5 make the chi-square approximation unreliable and are logged.

use crate::{Alternative, TestResult};
use bootstats_core::{math::distributions::chi_squared, Error, Result};
use tracing::{debug, warn};

/// Probabilities may deviate from summing to one by this much
const PROBABILITY_TOLERANCE: f64 = 1e-8;

/// Smallest expected count for which the approximation is considered safe
const MIN_EXPECTED_COUNT: f64 = 5.0;

/// Chi-square test outcome with its expected counts
#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquareResult {
    /// Statistic, p-value and degrees of freedom
    pub test: TestResult,
    /// Expected counts, in the layout of the observed counts (row-major for tables)
    pub expected: Vec<f64>,
    /// Whether the Yates continuity correction was applied
    pub yates_corrected: bool,
}

impl ChiSquareResult {
    pub fn statistic(&self) -> f64 {
        self.test.statistic
    }

    pub fn p_value(&self) -> f64 {
        self.test.p_value
    }

    pub fn df(&self) -> f64 {
        self.test.df.unwrap_or_default()
    }
}

fn check_counts(counts: &[f64], context: &str) -> Result<()> {
    if let Some(bad) = counts.iter().find(|c| !(c.is_finite() && **c >= 0.0)) {
        return Err(Error::InvalidInput(format!(
            "{context}: counts must be finite and non-negative, got {bad}"
        )));
    }
    Ok(())
}

fn warn_small_expected(expected: &[f64]) {
    let small = expected.iter().filter(|&&e| e < MIN_EXPECTED_COUNT).count();
    if small > 0 {
        warn!(
            cells = small,
            "expected counts below {MIN_EXPECTED_COUNT}, chi-square approximation may be inaccurate"
        );
    }
}

fn finish(statistic: f64, df: f64, expected: Vec<f64>, yates_corrected: bool) -> Result<ChiSquareResult> {
    let p_value = chi_squared::sf(statistic, df)?;
    debug!(statistic, df, p_value, yates_corrected, "chi-square test");
    Ok(ChiSquareResult {
        test: TestResult {
            statistic,
            p_value,
            ci: None,
            alternative: Alternative::Greater,
            df: Some(df),
        },
        expected,
        yates_corrected,
    })
}

/// Goodness of fit of `observed` counts to `probabilities`
///
/// When the probabilities do not sum to one they are rescaled if `rescale`
/// is set and rejected otherwise.
pub fn goodness_of_fit(observed: &[f64], probabilities: &[f64], rescale: bool) -> Result<ChiSquareResult> {
    if observed.len() < 2 {
        return Err(Error::InsufficientData {
            expected: 2,
            actual: observed.len(),
        });
    }
    if probabilities.len() != observed.len() {
        return Err(Error::size_mismatch(
            observed.len(),
            probabilities.len(),
            "goodness-of-fit probabilities",
        ));
    }
    check_counts(observed, "goodness of fit")?;
    if probabilities.iter().any(|p| !(p.is_finite() && *p >= 0.0)) {
        return Err(Error::InvalidParameter(
            "Probabilities must be finite and non-negative".to_string(),
        ));
    }

    let total_probability: f64 = probabilities.iter().sum();
    let scale = if (total_probability - 1.0).abs() <= PROBABILITY_TOLERANCE {
        1.0
    } else if rescale && total_probability > 0.0 {
        debug!(total_probability, "rescaling probabilities");
        total_probability
    } else {
        return Err(Error::InvalidParameter(format!(
            "Probabilities sum to {total_probability}, expected 1"
        )));
    };

    let n: f64 = observed.iter().sum();
    if n <= 0.0 {
        return Err(Error::InvalidInput("Observed counts sum to zero".to_string()));
    }

    let expected: Vec<f64> = probabilities.iter().map(|p| n * p / scale).collect();
    if expected.iter().any(|&e| e == 0.0) {
        return Err(Error::NumericDegeneracy(
            "Zero expected count in goodness-of-fit test".to_string(),
        ));
    }
    warn_small_expected(&expected);

    let statistic = observed
        .iter()
        .zip(&expected)
        .map(|(o, e)| (o - e).powi(2) / e)
        .sum();
    finish(statistic, (observed.len() - 1) as f64, expected, false)
}

/// Goodness of fit to equal probabilities in every category
pub fn goodness_of_fit_uniform(observed: &[f64]) -> Result<ChiSquareResult> {
    let k = observed.len().max(1);
    goodness_of_fit(observed, &vec![1.0 / k as f64; observed.len()], true)
}

/// Contingency table of counts stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyTable {
    rows: usize,
    cols: usize,
    counts: Vec<f64>,
}

impl ContingencyTable {
    /// Table from row-major counts
    pub fn new(rows: usize, cols: usize, counts: Vec<f64>) -> Result<Self> {
        if rows < 2 || cols < 2 {
            return Err(Error::InvalidInput(format!(
                "Contingency table needs at least 2 rows and 2 columns, got {rows}x{cols}"
            )));
        }
        if counts.len() != rows * cols {
            return Err(Error::size_mismatch(rows * cols, counts.len(), "contingency table"));
        }
        check_counts(&counts, "contingency table")?;
        Ok(Self { rows, cols, counts })
    }

    /// Table from a slice of equally long rows
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut counts = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::size_mismatch(cols, row.len(), "contingency table row"));
            }
            counts.extend_from_slice(row);
        }
        Self::new(rows.len(), cols, counts)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.counts[row * self.cols + col]
    }

    pub fn row_totals(&self) -> Vec<f64> {
        self.counts.chunks(self.cols).map(|r| r.iter().sum()).collect()
    }

    pub fn col_totals(&self) -> Vec<f64> {
        (0..self.cols)
            .map(|j| (0..self.rows).map(|i| self.get(i, j)).sum())
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Expected counts `row_total * col_total / total`, row-major
    pub fn expected(&self) -> Result<Vec<f64>> {
        let total = self.total();
        if total <= 0.0 {
            return Err(Error::InvalidInput("Contingency table is empty".to_string()));
        }
        let row_totals = self.row_totals();
        let col_totals = self.col_totals();
        if row_totals.iter().chain(&col_totals).any(|&m| m == 0.0) {
            return Err(Error::NumericDegeneracy(
                "Contingency table has an empty row or column".to_string(),
            ));
        }
        Ok(row_totals
            .iter()
            .flat_map(|r| col_totals.iter().map(move |c| r * c / total))
            .collect())
    }

    fn is_two_by_two(&self) -> bool {
        self.rows == 2 && self.cols == 2
    }
}

/// Independence of the row and column classifications
///
/// With `yates` set, a 2x2 table has every `|O - E|` reduced by
/// `min(0.5, |O - E|)` before squaring. Larger tables ignore the flag.
pub fn independence(table: &ContingencyTable, yates: bool) -> Result<ChiSquareResult> {
    let expected = table.expected()?;
    warn_small_expected(&expected);

    let corrected = yates && table.is_two_by_two();
    if yates && !corrected {
        debug!(rows = table.rows, cols = table.cols, "Yates correction only applies to 2x2 tables");
    }

    let statistic = table
        .counts
        .iter()
        .zip(&expected)
        .map(|(o, e)| {
            let deviation = (o - e).abs();
            let deviation = if corrected {
                deviation - deviation.min(0.5)
            } else {
                deviation
            };
            deviation.powi(2) / e
        })
        .sum();

    let df = ((table.rows - 1) * (table.cols - 1)) as f64;
    finish(statistic, df, expected, corrected)
}

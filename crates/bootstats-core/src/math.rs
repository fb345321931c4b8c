//! Reference distributions for confidence intervals and hypothesis tests
//!
//! Thin wrappers over `statrs` so that every crate evaluates tail
//! probabilities the same way. Functions that can only fail on bad
//! parameters return [`Result`]; the standard normal helpers are total.

/// Distribution-related mathematical functions
pub mod distributions {
    /// Standard normal distribution
    pub mod normal {
        use statrs::function::erf::{erfc, erfc_inv};
        use std::f64::consts::SQRT_2;

        /// Cumulative distribution function of N(0, 1)
        pub fn cdf(x: f64) -> f64 {
            0.5 * erfc(-x / SQRT_2)
        }

        /// Survival function `1 - cdf(x)`, accurate in the upper tail
        pub fn sf(x: f64) -> f64 {
            0.5 * erfc(x / SQRT_2)
        }

        /// Inverse CDF (percent point function) of N(0, 1)
        pub fn ppf(p: f64) -> f64 {
            if p <= 0.0 {
                return f64::NEG_INFINITY;
            }
            if p >= 1.0 {
                return f64::INFINITY;
            }
            -SQRT_2 * erfc_inv(2.0 * p)
        }

        /// Alias for ppf (percent point function) that matches common naming
        #[inline]
        pub fn quantile(p: f64) -> f64 {
            ppf(p)
        }

        /// Two-sided p-value `2 * (1 - Phi(|z|))`
        pub fn two_sided_p_value(z: f64) -> f64 {
            (2.0 * sf(z.abs())).min(1.0)
        }

    }

    /// Chi-square distribution
    pub mod chi_squared {
        use crate::{Error, Result};
        use statrs::distribution::{ChiSquared, ContinuousCDF};

        fn distribution(df: f64) -> Result<ChiSquared> {
            if !(df > 0.0 && df.is_finite()) {
                return Err(Error::InvalidParameter(format!(
                    "Chi-square degrees of freedom {df} must be positive"
                )));
            }
            ChiSquared::new(df).map_err(|e| {
                Error::Computation(format!("Failed to create chi-square distribution: {e}"))
            })
        }

        /// Cumulative distribution function
        pub fn cdf(x: f64, df: f64) -> Result<f64> {
            Ok(distribution(df)?.cdf(x))
        }

        /// Upper-tail probability `P(X >= x)`
        pub fn sf(x: f64, df: f64) -> Result<f64> {
            Ok(distribution(df)?.sf(x))
        }

    }

    /// Student's t distribution
    pub mod students_t {
        use crate::{Error, Result};
        use statrs::distribution::{ContinuousCDF, StudentsT};

        fn distribution(df: f64) -> Result<StudentsT> {
            if !(df > 0.0 && df.is_finite()) {
                return Err(Error::InvalidParameter(format!(
                    "t-distribution degrees of freedom {df} must be positive"
                )));
            }
            StudentsT::new(0.0, 1.0, df).map_err(|e| {
                Error::Computation(format!("Failed to create t-distribution: {e}"))
            })
        }

        /// Cumulative distribution function
        pub fn cdf(t: f64, df: f64) -> Result<f64> {
            Ok(distribution(df)?.cdf(t))
        }

        /// Inverse CDF
        pub fn quantile(p: f64, df: f64) -> Result<f64> {
            Ok(distribution(df)?.inverse_cdf(p))
        }

        /// Two-sided p-value `2 * P(T >= |t|)`
        pub fn two_sided_p_value(t: f64, df: f64) -> Result<f64> {
            Ok((2.0 * cdf(-t.abs(), df)?).min(1.0))
        }

        #[cfg(test)]
        mod tests {
            use super::*;
            use approx::assert_abs_diff_eq;

            #[test]
            fn test_students_t() {
                assert_abs_diff_eq!(cdf(0.0, 5.0).unwrap(), 0.5, epsilon = 1e-12);
                // t_{0.975, 10}
                assert_abs_diff_eq!(quantile(0.975, 10.0).unwrap(), 2.228138851986, epsilon = 1e-6);
                assert_abs_diff_eq!(
                    two_sided_p_value(2.228138851986, 10.0).unwrap(),
                    0.05,
                    epsilon = 1e-6
                );
            }

            #[test]
            fn test_no_degrees_of_freedom() {
                assert!(cdf(1.0, 0.0).is_err());
            }
        }
    }

    /// Fisher-Snedecor F distribution
    pub mod fisher_f {
        use crate::{Error, Result};
        use statrs::distribution::{ContinuousCDF, FisherSnedecor};

        fn distribution(d1: f64, d2: f64) -> Result<FisherSnedecor> {
            if !(d1 > 0.0 && d1.is_finite() && d2 > 0.0 && d2.is_finite()) {
                return Err(Error::InvalidParameter(format!(
                    "F-distribution degrees of freedom ({d1}, {d2}) must be positive"
                )));
            }
            FisherSnedecor::new(d1, d2).map_err(|e| {
                Error::Computation(format!("Failed to create F-distribution: {e}"))
            })
        }

        /// Upper-tail probability `P(F >= x)`
        pub fn sf(x: f64, d1: f64, d2: f64) -> Result<f64> {
            Ok(distribution(d1, d2)?.sf(x))
        }

    }
}

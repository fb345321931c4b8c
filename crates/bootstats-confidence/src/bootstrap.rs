//! Bootstrap orchestration
//!
//! [`Bootstrap`] evaluates the statistic once on the original sample, then
//! draws `B` replicates and evaluates the statistic on each. The replicate
//! loop is handed to an [`ExecutionEngine`]; every replicate draws from its
//! own random stream ([`replicate_rng`]) and results come back in replicate
//! order, so a seeded run produces the same distribution on any engine.
//!
//! Configuration problems are reported before the first replicate is drawn.

use crate::{
    bootstrap_methods::{BootstrapMethod, PercentileBootstrap},
    config::{BootstrapConfig, NonFinitePolicy},
    estimator,
    resample::{draw_replicate, replicate_rng},
    statistic::{Statistic, TwoSampleStatistic},
    ConfidenceInterval,
};
use bootstats_core::{Error, ExecutionEngine, QuantileInterpolation, Result, SequentialEngine};
use rand::Rng;
use std::{
    fmt,
    sync::atomic::{AtomicUsize, Ordering},
};
use tracing::{debug, info, instrument, warn};

/// Summary of one bootstrap run
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult {
    /// Statistic evaluated on the original sample (t0)
    pub observed_statistic: f64,
    /// Sample standard deviation of the finite replicate values
    pub standard_error: f64,
    /// Lower confidence bound
    pub ci_lower: f64,
    /// Upper confidence bound
    pub ci_upper: f64,
    /// Confidence level of the bounds
    pub confidence_level: f64,
    /// Wald statistic `(t0 - null_value) / se`; `None` when `se == 0`
    pub z: Option<f64>,
    /// Two-sided p-value of the Wald statistic
    pub p_value: Option<f64>,
    /// Number of replicates drawn
    pub replicate_count: usize,
    /// Replicates dropped because their statistic was not finite
    pub excluded_replicates: usize,
    /// `mean(t*) - t0`
    pub bias: f64,
    /// Master seed the run used
    pub seed: u64,
    /// Name of the interval method
    pub method: &'static str,
    /// Raw replicate values in replicate order, non-finite values included
    pub distribution: Vec<f64>,
}

impl BootstrapResult {
    /// The interval as a [`ConfidenceInterval`]
    pub fn interval(&self) -> ConfidenceInterval {
        ConfidenceInterval::new(
            self.ci_lower,
            self.ci_upper,
            self.observed_statistic,
            self.confidence_level,
        )
    }

    /// Number of replicates that entered the summaries
    pub fn finite_replicates(&self) -> usize {
        self.replicate_count - self.excluded_replicates
    }

    /// Whether the Wald test rejects at level `alpha`
    pub fn is_significant(&self, alpha: f64) -> bool {
        self.p_value.is_some_and(|p| p < alpha)
    }
}

impl fmt::Display for BootstrapResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (B = {}): estimate {:.4}, se {:.4}, {}",
            self.method,
            self.replicate_count,
            self.observed_statistic,
            self.standard_error,
            self.interval()
        )?;
        if let (Some(z), Some(p)) = (self.z, self.p_value) {
            write!(f, ", z = {z:.4}, p = {p:.4}")?;
        }
        if self.excluded_replicates > 0 {
            write!(f, " ({} replicates excluded)", self.excluded_replicates)?;
        }
        Ok(())
    }
}

/// Bootstrap engine parameterised by execution engine and interval method
///
/// ```rust
/// use bootstats_confidence::{Bootstrap, Mean};
///
/// let sample = [2.1, 3.4, 1.9, 5.6, 4.2, 3.3, 2.8, 4.9];
/// let result = Bootstrap::sequential()
///     .with_replicates(500)
///     .with_seed(42)
///     .run(&sample, &Mean)
///     .unwrap();
///
/// assert!(result.ci_lower <= result.observed_statistic);
/// assert!(result.observed_statistic <= result.ci_upper);
/// ```
#[derive(Debug, Clone)]
pub struct Bootstrap<E = SequentialEngine, M = PercentileBootstrap> {
    engine: E,
    method: M,
    config: BootstrapConfig,
}

impl Bootstrap<SequentialEngine, PercentileBootstrap> {
    /// Sequential percentile bootstrap with default settings
    pub fn sequential() -> Self {
        Self::new(SequentialEngine, PercentileBootstrap)
    }
}

impl Default for Bootstrap<SequentialEngine, PercentileBootstrap> {
    fn default() -> Self {
        Self::sequential()
    }
}

impl<E, M> Bootstrap<E, M>
where
    E: ExecutionEngine,
    M: BootstrapMethod,
{
    /// Create a new bootstrap engine
    pub fn new(engine: E, method: M) -> Self {
        Self {
            engine,
            method,
            config: BootstrapConfig::default(),
        }
    }

    /// Set the number of bootstrap replicates
    pub fn with_replicates(mut self, replicate_count: usize) -> Self {
        self.config.replicate_count = replicate_count;
        self
    }

    /// Set the confidence level
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.config.confidence_level = confidence_level;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    pub fn with_non_finite_policy(mut self, policy: NonFinitePolicy) -> Self {
        self.config.non_finite_policy = policy;
        self
    }

    /// Set the hypothesised value used by the Wald test
    pub fn with_null_value(mut self, null_value: f64) -> Self {
        self.config.null_value = null_value;
        self
    }

    pub fn with_quantile_interpolation(mut self, interpolation: QuantileInterpolation) -> Self {
        self.config.quantile_interpolation = interpolation;
        self
    }

    /// Replace every setting at once
    pub fn with_config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the interval method, keeping engine and settings
    pub fn with_method<M2: BootstrapMethod>(self, method: M2) -> Bootstrap<E, M2> {
        Bootstrap {
            engine: self.engine,
            method,
            config: self.config,
        }
    }

    /// Swap the execution engine, keeping method and settings
    pub fn with_engine<E2: ExecutionEngine>(self, engine: E2) -> Bootstrap<E2, M> {
        Bootstrap {
            engine,
            method: self.method,
            config: self.config,
        }
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    pub fn method(&self) -> &M {
        &self.method
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Bootstrap a statistic of one sample
    #[instrument(
        skip(self, sample, statistic),
        fields(n = sample.len(), replicates = self.config.replicate_count)
    )]
    pub fn run<T, S>(&self, sample: &[T], statistic: &S) -> Result<BootstrapResult>
    where
        T: Copy + Send + Sync,
        S: Statistic<T> + ?Sized,
    {
        self.config.validate()?;
        if sample.is_empty() {
            return Err(Error::empty_input("bootstrap"));
        }

        let observed = check_observed(statistic.evaluate(sample))?;
        let seed = self.start(sample.len());

        let failure = FirstFailure::new(self.config.non_finite_policy);
        let distribution = self.engine.execute_batch_with(
            self.config.replicate_count,
            || Vec::with_capacity(sample.len()),
            |buffer: &mut Vec<T>, i| {
                if failure.skip(i) {
                    return f64::NAN;
                }
                let mut rng = replicate_rng(seed, i);
                draw_replicate(sample, &mut rng, buffer);
                failure.record(i, statistic.evaluate(buffer))
            },
        );
        failure.check()?;

        self.summarise(observed, distribution, seed)
    }

    /// Bootstrap a statistic of paired observations
    ///
    /// Pairs are resampled as units, which keeps the within-pair dependence.
    pub fn run_paired<S>(&self, pairs: &[(f64, f64)], statistic: &S) -> Result<BootstrapResult>
    where
        S: Statistic<(f64, f64)> + ?Sized,
    {
        self.run(pairs, statistic)
    }

    /// Bootstrap a statistic comparing two independent samples
    ///
    /// Each replicate resamples both groups within their own sizes.
    #[instrument(
        skip(self, first, second, statistic),
        fields(n1 = first.len(), n2 = second.len(), replicates = self.config.replicate_count)
    )]
    pub fn run_two_sample<S>(
        &self,
        first: &[f64],
        second: &[f64],
        statistic: &S,
    ) -> Result<BootstrapResult>
    where
        S: TwoSampleStatistic + ?Sized,
    {
        self.config.validate()?;
        if first.is_empty() || second.is_empty() {
            return Err(Error::empty_input("two-sample bootstrap"));
        }

        let observed = check_observed(statistic.evaluate(first, second))?;
        let seed = self.start(first.len() + second.len());

        let failure = FirstFailure::new(self.config.non_finite_policy);
        let distribution = self.engine.execute_batch_with(
            self.config.replicate_count,
            || (Vec::with_capacity(first.len()), Vec::with_capacity(second.len())),
            |buffers: &mut (Vec<f64>, Vec<f64>), i| {
                if failure.skip(i) {
                    return f64::NAN;
                }
                let mut rng = replicate_rng(seed, i);
                draw_replicate(first, &mut rng, &mut buffers.0);
                draw_replicate(second, &mut rng, &mut buffers.1);
                failure.record(i, statistic.evaluate(&buffers.0, &buffers.1))
            },
        );
        failure.check()?;

        self.summarise(observed, distribution, seed)
    }

    /// Resolve the seed and log the run settings
    fn start(&self, n: usize) -> u64 {
        let seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::thread_rng().gen());
        info!(
            seed,
            seeded = self.config.seed.is_some(),
            policy = self.config.non_finite_policy.name(),
            method = self.method.name(),
            engine = ?self.engine.strategy(),
            n,
            "starting bootstrap"
        );
        seed
    }

    fn summarise(&self, observed: f64, distribution: Vec<f64>, seed: u64) -> Result<BootstrapResult> {
        let level = self.config.level()?;
        let (finite, excluded) = self.config.non_finite_policy.apply(&distribution)?;
        if excluded > 0 {
            warn!(
                excluded,
                total = distribution.len(),
                "excluded replicates with a non-finite statistic"
            );
        }

        let sorted = estimator::sort_values(&finite);
        let standard_error = estimator::standard_error(&sorted)?;
        let bias = estimator::bias(&sorted, observed)?;
        let interval = self.method.calculate_interval(
            &sorted,
            observed,
            level,
            self.config.quantile_interpolation,
        )?;

        let wald = if standard_error > 0.0 {
            Some(estimator::wald_test(observed, self.config.null_value, standard_error)?)
        } else {
            warn!("bootstrap distribution is constant, Wald test is undefined");
            None
        };

        debug!(
            observed,
            standard_error,
            bias,
            lower = interval.lower,
            upper = interval.upper,
            "bootstrap completed"
        );

        Ok(BootstrapResult {
            observed_statistic: observed,
            standard_error,
            ci_lower: interval.lower,
            ci_upper: interval.upper,
            confidence_level: level.value(),
            z: wald.map(|w| w.z),
            p_value: wald.map(|w| w.p_value),
            replicate_count: distribution.len(),
            excluded_replicates: excluded,
            bias,
            seed,
            method: self.method.name(),
            distribution,
        })
    }
}

/// Lowest replicate index with a non-finite statistic, tracked under
/// [`NonFinitePolicy::FailFast`]
///
/// Replicates above a recorded failure are skipped without drawing or
/// evaluating. Replicates below it still run, so the reported index is the
/// first failing replicate in index order on every engine.
struct FirstFailure {
    enabled: bool,
    index: AtomicUsize,
}

impl FirstFailure {
    fn new(policy: NonFinitePolicy) -> Self {
        Self {
            enabled: policy == NonFinitePolicy::FailFast,
            index: AtomicUsize::new(usize::MAX),
        }
    }

    fn skip(&self, replicate: usize) -> bool {
        self.enabled && self.index.load(Ordering::Relaxed) < replicate
    }

    fn record(&self, replicate: usize, value: f64) -> f64 {
        if self.enabled && !value.is_finite() {
            self.index.fetch_min(replicate, Ordering::Relaxed);
        }
        value
    }

    fn check(&self) -> Result<()> {
        match self.index.load(Ordering::Relaxed) {
            usize::MAX => Ok(()),
            index => {
                warn!(replicate = index, "stopping at the first non-finite replicate");
                Err(Error::Computation(format!(
                    "replicate {index} produced a non-finite statistic"
                )))
            }
        }
    }
}

fn check_observed(observed: f64) -> Result<f64> {
    if observed.is_finite() {
        Ok(observed)
    } else {
        Err(Error::NumericDegeneracy(format!(
            "statistic on the original sample is not finite ({observed})"
        )))
    }
}

//! Walk through the main inference routines on simulated data
//!
//! Run with `RUST_LOG=bootstats_confidence=debug` to see the bootstrap logs.

use anyhow::Result;
use bootstats::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal, Normal};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let control: Vec<f64> = LogNormal::new(3.0, 0.4)?
        .sample_iter(&mut rng)
        .take(200)
        .collect();
    let treatment: Vec<f64> = LogNormal::new(3.1, 0.4)?
        .sample_iter(&mut rng)
        .take(200)
        .collect();

    println!("=== Bootstrap ===");
    let bootstrap = Bootstrap::sequential().with_replicates(2000).with_seed(7);

    let mean = bootstrap.run(&control, &Mean)?;
    println!("mean of control:         {mean}");

    let median_diff = bootstrap.run_two_sample(&control, &treatment, &MedianDifference)?;
    println!("median(treatment - ctl): {median_diff}");

    let basic = bootstrap
        .clone()
        .with_method(BasicBootstrap)
        .run_two_sample(&control, &treatment, &MeanDifference)?;
    println!("mean difference (basic): {basic}");

    println!("\n=== z-tests ===");
    let z = ZTest::new().two_sample(&control, &treatment, Sigma::Estimated, Sigma::Estimated)?;
    println!("two-sample z-test:  {z}");
    let z = ZTest::new()
        .with_alternative(Alternative::Greater)
        .one_sample(&treatment, Sigma::Estimated)?;
    println!("mean(treatment) > 0: {z}");

    println!("\n=== Chi-square ===");
    let table = ContingencyTable::from_rows(&[[12.0, 5.0], [3.0, 9.0]])?;
    println!("independence:        {}", independence(&table, false)?.test);
    println!("independence (Yates): {}", independence(&table, true)?.test);
    let gof = goodness_of_fit(&[30.0, 50.0, 20.0], &[0.25, 0.5, 0.25], false)?;
    println!("goodness of fit:     {}", gof.test);

    println!("\n=== Regression ===");
    let noise = Normal::new(0.0, 1.0)?;
    let dose: Vec<f64> = (0..50).map(|i| i as f64 / 5.0).collect();
    let response: Vec<f64> = dose
        .iter()
        .map(|d| 1.5 + 0.8 * d + noise.sample(&mut rng))
        .collect();

    let cor = correlation_test(&dose, &response, Alternative::TwoSided, 0.95)?;
    println!("correlation r = {:.4}: {}", cor.estimate, cor.test);

    let data = Dataset::new()
        .with_column("dose", dose)?
        .with_column("response", response)?;
    let fit = fit_ols(&ModelSpec::new("response").predictor("dose"), &data)?;
    for coef in &fit.coefficients {
        println!(
            "{:<12} {:>9.4} (se {:.4}, t {:.2}, p {:.3e})",
            coef.name, coef.estimate, coef.std_error, coef.t_value, coef.p_value
        );
    }
    println!("R^2 = {:.4}, sigma = {:.4}", fit.r_squared, fit.residual_standard_error);

    Ok(())
}

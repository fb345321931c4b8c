//! End-to-end runs through the facade crate

use approx::assert_abs_diff_eq;
use bootstats::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

const X: [f64; 16] = [
    10.0, 12.0, 15.0, 20.0, 7.0, 11.0, 15.0, 18.0, 9.0, 10.0, 11.0, 13.0, 15.0, 16.0, 9.0, 10.0,
];
const Y: [f64; 16] = [
    11.0, 9.0, 14.0, 18.0, 12.0, 10.0, 9.0, 17.0, 15.0, 12.0, 12.0, 14.0, 15.0, 16.0, 14.0, 13.0,
];

#[test]
fn paired_z_test_matches_reference_values() {
    let d: Vec<f64> = X.iter().zip(&Y).map(|(x, y)| y - x).collect();
    let dbar = mean(&d).unwrap();
    let se = (variance(&d).unwrap() / 16.0).sqrt();

    let result = ZTest::new().paired(&X, &Y, Sigma::Estimated).unwrap();

    assert_abs_diff_eq!(dbar, 0.625, epsilon = 1e-12);
    assert_abs_diff_eq!(se, 0.784618, epsilon = 1e-6);
    assert_abs_diff_eq!(result.statistic, dbar / se, epsilon = 1e-12);
    assert_abs_diff_eq!(result.statistic, 0.7966, epsilon = 5e-5);
    assert_abs_diff_eq!(result.p_value, 0.4257, epsilon = 5e-5);
    assert_abs_diff_eq!(
        result.p_value,
        2.0 * (1.0 - normal::cdf(dbar / se)),
        epsilon = 1e-10
    );
    assert!(result.ci_lower().unwrap() < 0.0 && result.ci_upper().unwrap() > 0.0);
}

#[test]
fn paired_bootstrap_agrees_with_z_test() {
    let pairs: Vec<(f64, f64)> = X.iter().copied().zip(Y.iter().copied()).collect();
    let result = Bootstrap::sequential()
        .with_replicates(4000)
        .with_seed(2024)
        .run_paired(&pairs, &PairedMeanDifference)
        .unwrap();

    assert_abs_diff_eq!(result.observed_statistic, 0.625, epsilon = 1e-12);
    // Bootstrap SE uses the 1/n plug-in variance, so it sits a little under 0.7846
    assert!(result.standard_error > 0.6 && result.standard_error < 0.9);
    assert!(result.p_value.unwrap() > 0.2);
    assert!(result.ci_lower < 0.0 && result.ci_upper > 0.0);
}

#[test]
fn median_difference_interval_covers_zero() {
    const TRIALS: u64 = 100;
    const N: usize = 1000;

    let first_dist = Normal::new(5.0, 1.0).unwrap();
    let second_dist = Normal::new(5.0, 1.5).unwrap();
    let bootstrap = Bootstrap::sequential().with_replicates(1000);

    let covered = (0..TRIALS)
        .filter(|&trial| {
            let mut rng = ChaCha8Rng::seed_from_u64(trial);
            let first: Vec<f64> = (0..N).map(|_| first_dist.sample(&mut rng)).collect();
            let second: Vec<f64> = (0..N).map(|_| second_dist.sample(&mut rng)).collect();

            let result = bootstrap
                .clone()
                .with_seed(10_000 + trial)
                .run_two_sample(&first, &second, &MedianDifference)
                .unwrap();
            result.interval().contains(0.0)
        })
        .count();

    assert!(
        covered as f64 >= 0.9 * TRIALS as f64,
        "interval covered zero in only {covered} of {TRIALS} trials"
    );
}

#[test]
fn yates_correction_changes_the_p_value() {
    let table = ContingencyTable::from_rows(&[[12.0, 5.0], [3.0, 9.0]]).unwrap();

    let plain = independence(&table, false).unwrap();
    let corrected = independence(&table, true).unwrap();

    assert!(corrected.yates_corrected);
    assert!(!plain.yates_corrected);
    assert!(corrected.statistic() < plain.statistic());
    assert!((corrected.p_value() - plain.p_value()).abs() > 1e-3);
    assert_eq!(plain.df(), 1.0);
}

#[test]
fn single_replicate_is_degenerate() {
    let err = Bootstrap::sequential()
        .with_replicates(1)
        .with_seed(1)
        .run(&X, &Mean)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NumericDegeneracy);
}

#[test]
fn correlation_and_regression_on_the_same_columns() {
    let data = Dataset::new()
        .with_column("x", X.to_vec())
        .unwrap()
        .with_column("y", Y.to_vec())
        .unwrap();

    let fit = fit_ols(&ModelSpec::new("y").predictor("x"), &data).unwrap();
    let cor = correlation_test(&X, &Y, Alternative::TwoSided, 0.95).unwrap();

    assert_abs_diff_eq!(fit.r_squared, cor.estimate * cor.estimate, epsilon = 1e-12);
    assert_abs_diff_eq!(
        fit.coefficient("x").unwrap().p_value,
        cor.test.p_value,
        epsilon = 1e-10
    );
}

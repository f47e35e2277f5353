//! Tests for the statistical primitives.

use approx::assert_abs_diff_eq;
use tiq_common::metrics::{
    ewma, mean, moving_average, percentile, rate_of_change, sharpe_like, stddev, zscore,
};

#[test]
fn test_mean_empty_is_zero() {
    assert_eq!(mean(&[]), 0.0);
    assert_eq!(mean(&[2.0, 4.0]), 3.0);
}

#[test]
fn test_percentile_empty_is_zero() {
    for p in [0.0, 0.5, 0.9, 1.0] {
        assert_eq!(percentile(&[], p), 0.0);
    }
}

#[test]
fn test_percentile_single_element_is_that_element() {
    for p in [0.0, 0.25, 0.5, 0.99, 1.0] {
        assert_eq!(percentile(&[5.0], p), 5.0);
    }
}

#[test]
fn test_percentile_interpolates_between_ranks() {
    assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 0.5), 2.5);
    assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 0.0), 1.0);
    assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 1.0), 4.0);
    // input order must not matter
    assert_eq!(percentile(&[4.0, 1.0, 3.0, 2.0], 0.5), 2.5);
}

#[test]
fn test_percentile_tail_estimate() {
    let xs: Vec<f64> = (1..=100).map(f64::from).collect();
    assert_abs_diff_eq!(percentile(&xs, 0.9), 90.1, epsilon = 1e-9);
}

#[test]
fn test_stddev_properties() {
    assert_eq!(stddev(&[]), 0.0);
    assert_eq!(stddev(&[7.0]), 0.0);
    assert!(stddev(&[1.0, 5.0, 9.0]) >= 0.0);
    // population variant: divide by N, not N-1
    assert_abs_diff_eq!(stddev(&[2.0, 4.0]), 1.0, epsilon = 1e-9);
}

#[test]
fn test_ewma_shape_and_seeding() {
    assert!(ewma(&[], 0.5).is_empty());

    let xs = [10.0, 20.0];
    let out = ewma(&xs, 0.5);
    assert_eq!(out, vec![10.0, 15.0]);

    let xs = [3.0, 1.0, 4.0, 1.0, 5.0];
    let out = ewma(&xs, 0.2);
    assert_eq!(out.len(), xs.len());
    assert_eq!(out[0], xs[0]);
}

#[test]
fn test_ewma_accumulator_stays_unrounded() {
    // rounding each output must not feed back into the recursion
    let out = ewma(&[0.0, 0.006, 0.006, 0.006], 0.5);
    assert_eq!(out[1], 0.0);
    assert_eq!(out[3], 0.01);
}

#[test]
fn test_zscore_guards() {
    assert_eq!(zscore(&[], Some(3.0)), 0.0);
    assert_eq!(zscore(&[5.0, 5.0, 5.0], Some(5.0)), 0.0);
}

#[test]
fn test_zscore_defaults_to_last_element() {
    let xs = [1.0, 2.0, 3.0, 10.0];
    assert_abs_diff_eq!(
        zscore(&xs, None),
        zscore(&xs, Some(10.0)),
        epsilon = 1e-12
    );
    assert!(zscore(&xs, None) > 0.0);
}

#[test]
fn test_rate_of_change() {
    assert_eq!(rate_of_change(&[]), 0.0);
    assert_eq!(rate_of_change(&[4.0]), 0.0);
    assert_eq!(rate_of_change(&[0.0, 5.0]), 0.0);
    assert_abs_diff_eq!(rate_of_change(&[10.0, 15.0]), 0.5, epsilon = 1e-9);
    // reference magnitude, not sign, scales the change
    assert_abs_diff_eq!(rate_of_change(&[-10.0, -5.0]), 0.5, epsilon = 1e-9);
}

#[test]
fn test_sharpe_like() {
    assert_eq!(sharpe_like(&[]), 0.0);
    assert_eq!(sharpe_like(&[3.0, 3.0]), 0.0);
    assert_abs_diff_eq!(sharpe_like(&[2.0, 4.0]), 3.0, epsilon = 1e-9);
}

#[test]
fn test_moving_average_partial_windows() {
    assert_eq!(moving_average(&[1.0, 2.0, 3.0], 2), vec![1.0, 1.5, 2.5]);
    assert_eq!(
        moving_average(&[6.0, 6.0, 6.0, 6.0], 3),
        vec![6.0, 6.0, 6.0, 6.0]
    );
    assert!(moving_average(&[], 3).is_empty());
}

#[test]
fn test_moving_average_rounds_to_two_decimals() {
    assert_eq!(moving_average(&[1.0, 2.0, 4.0], 3), vec![1.0, 1.5, 2.33]);
}

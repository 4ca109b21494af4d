//! Unit tests for window arithmetic

use crate::support::assert_close;
use quorum::common::math;

#[test]
fn test_mean() {
    assert_eq!(math::mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    assert_eq!(math::mean(&[]), None);
}

#[test]
fn test_tail_and_sma_use_trailing_window() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(math::tail(&values, 2), Some(&[4.0, 5.0][..]));
    assert_eq!(math::tail(&values, 6), None);
    assert_eq!(math::tail(&values, 0), None);
    assert_eq!(math::sma(&values, 3), Some(4.0));
}

#[test]
fn test_ema_seeded_with_first_value() {
    // multiplier for period 3 is 0.5
    assert_eq!(math::ema(&[10.0, 20.0], 3), Some(15.0));
    assert_eq!(math::ema(&[7.0], 5), Some(7.0));
    assert_eq!(math::ema(&[], 5), None);
}

#[test]
fn test_ema_of_constant_is_constant() {
    assert_eq!(math::ema(&[5.0; 30], 9), Some(5.0));
}

#[test]
fn test_ema_series_length() {
    let values: Vec<f64> = (1..=10).map(|v| v as f64).collect();
    let series = math::ema_series(&values, 4).unwrap();
    assert_eq!(series.len(), values.len());
    assert_eq!(series[0], 1.0);
    assert_eq!(series.last().copied(), math::ema(&values, 4));
}

#[test]
fn test_population_standard_deviation() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert_close(math::standard_deviation(&values, 8).unwrap(), 2.0, 1e-12);
    assert_eq!(math::standard_deviation(&[3.0; 5], 5), Some(0.0));
}

#[test]
fn test_percent_change() {
    assert_close(math::percent_change(100.0, 110.0).unwrap(), 10.0, 1e-12);
    assert_close(math::percent_change(200.0, 150.0).unwrap(), -25.0, 1e-12);
    assert_eq!(math::percent_change(0.0, 5.0), None);
}

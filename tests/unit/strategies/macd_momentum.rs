//! Unit tests for the MACD momentum strategy

use crate::support::{
    assert_close, falling_series, linear_closes, rising_series, series_from, volumes_with_last,
};
use quorum::indicators::momentum::{calculate_macd_default, SignalLineMethod};
use quorum::models::{SignalDirection, StrategyId};
use quorum::strategies::{MacdMomentumParams, MacdMomentumStrategy, StrategyEvaluator};

#[test]
fn test_min_candles() {
    let strategy = MacdMomentumStrategy::default();
    assert_eq!(strategy.id(), StrategyId::MacdMomentum);
    assert_eq!(strategy.min_candles(), 26);
}

#[test]
fn test_abstains_below_minimum() {
    let strategy = MacdMomentumStrategy::default();
    assert!(strategy.evaluate(&rising_series(25, 2.0)).is_none());
    assert!(strategy.evaluate(&rising_series(26, 2.0)).is_some());
}

#[test]
fn test_bullish_momentum_buys() {
    let signal = MacdMomentumStrategy::default()
        .evaluate(&rising_series(60, 2.0))
        .unwrap();
    assert_eq!(signal.direction, SignalDirection::Buy);
    // histogram of ~0.7 times 1000 saturates the score
    assert_eq!(signal.strength, 1.0);
}

#[test]
fn test_bearish_momentum_sells() {
    let signal = MacdMomentumStrategy::default()
        .evaluate(&falling_series(60, 2.0))
        .unwrap();
    assert_eq!(signal.direction, SignalDirection::Sell);
}

#[test]
fn test_strength_formula_below_cap() {
    let closes = linear_closes(60, 100.0, 0.0001);
    let series = series_from(&closes, &volumes_with_last(60, 2000.0));
    let signal = MacdMomentumStrategy::default().evaluate(&series).unwrap();

    let macd = calculate_macd_default(&closes).unwrap();
    let volume_ratio = 2000.0 / 1050.0;
    let expected = 0.8 + macd.histogram.abs() * 1000.0 + (volume_ratio - 1.3) * 0.1;
    assert!(expected < 1.0);
    assert_close(signal.strength, expected, 1e-9);
}

#[test]
fn test_requires_volume() {
    let strategy = MacdMomentumStrategy::default();
    assert!(strategy.evaluate(&rising_series(60, 1.0)).is_none());
    // ratio 1.2 / 1.01 = 1.188
    assert!(strategy.evaluate(&rising_series(60, 1.2)).is_none());
}

#[test]
fn test_ema_signal_line_variant() {
    let mut params = MacdMomentumParams::default();
    params.macd.signal_line = SignalLineMethod::Ema;
    let signal = MacdMomentumStrategy::new(params)
        .evaluate(&rising_series(60, 2.0))
        .unwrap();
    assert_eq!(signal.direction, SignalDirection::Buy);
}

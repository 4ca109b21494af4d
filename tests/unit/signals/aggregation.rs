//! Unit tests for consensus aggregation

use crate::support::{assert_close, base_time};
use chrono::Duration;
use quorum::models::{ConsensusAction, Signal, SignalDirection, StrategyId};
use quorum::signals::aggregation::{ConsensusAggregator, ConsensusConfig, ConsensusConfigError};

fn signal(strategy: StrategyId, direction: SignalDirection, strength: f64) -> Signal {
    Signal::new(strategy, direction, strength, Vec::new(), 100.0, base_time())
}

fn buy(strategy: StrategyId, strength: f64) -> Signal {
    signal(strategy, SignalDirection::Buy, strength)
}

fn sell(strategy: StrategyId, strength: f64) -> Signal {
    signal(strategy, SignalDirection::Sell, strength)
}

#[test]
fn test_three_agreeing_signals_approve() {
    let signals = vec![
        buy(StrategyId::RsiVolume, 0.8),
        buy(StrategyId::MacdMomentum, 0.75),
        buy(StrategyId::Confluence, 0.9),
    ];
    let decision = ConsensusAggregator::default().aggregate("BTC", signals);

    assert_eq!(decision.action, ConsensusAction::Buy);
    assert_eq!(decision.direction, Some(SignalDirection::Buy));
    assert!(decision.is_approved());
    assert_eq!(decision.agreement_count, 3);
    assert_eq!(decision.buy_count, 3);
    assert_eq!(decision.sell_count, 0);
    assert_close(decision.average_strength, 0.8167, 1e-4);
    assert_close(
        decision.recommended_size_usd.unwrap(),
        25.0 * decision.average_strength,
        1e-12,
    );
    assert_eq!(decision.contributing_signals.len(), 3);
    assert_eq!(decision.contributing_signals[0].strategy, StrategyId::RsiVolume);
    assert!(decision.rationale.contains("approved"));
}

#[test]
fn test_average_independent_of_order() {
    let strengths = [0.71, 0.93, 0.88, 0.7777];
    let aggregator = ConsensusAggregator::default();
    let forward: Vec<Signal> = strengths
        .iter()
        .map(|&s| sell(StrategyId::Confluence, s))
        .collect();
    let mut backward = forward.clone();
    backward.reverse();

    let a = aggregator.aggregate("ETH", forward);
    let b = aggregator.aggregate("ETH", backward);
    assert_eq!(a.action, ConsensusAction::Sell);
    assert_eq!(a.average_strength, b.average_strength);
}

#[test]
fn test_two_agreeing_signals_review() {
    let signals = vec![
        sell(StrategyId::BollingerReversion, 0.8),
        sell(StrategyId::EmaCrossover, 0.9),
    ];
    let decision = ConsensusAggregator::default().aggregate("BTC", signals);

    assert_eq!(decision.action, ConsensusAction::Review);
    assert_eq!(decision.direction, Some(SignalDirection::Sell));
    assert!(!decision.is_approved());
    assert!(decision.is_actionable());
    assert_eq!(decision.recommended_size_usd, None);
    assert_close(decision.average_strength, 0.85, 1e-12);
    assert!(decision.rationale.contains("manual review"));
}

#[test]
fn test_split_signals_wait() {
    let decision = ConsensusAggregator::default().aggregate(
        "BTC",
        vec![buy(StrategyId::RsiVolume, 0.9), sell(StrategyId::Confluence, 0.8)],
    );
    assert_eq!(decision.action, ConsensusAction::Wait);
    assert_eq!(decision.direction, None);
    assert!(!decision.is_actionable());
    assert!(decision.rationale.contains("No consensus"));
}

#[test]
fn test_tied_review_counts_wait() {
    let decision = ConsensusAggregator::default().aggregate(
        "BTC",
        vec![
            buy(StrategyId::RsiVolume, 0.9),
            buy(StrategyId::MacdMomentum, 0.9),
            sell(StrategyId::EmaCrossover, 0.9),
            sell(StrategyId::Confluence, 0.9),
        ],
    );
    assert_eq!(decision.action, ConsensusAction::Wait);
    assert_eq!(decision.buy_count, 2);
    assert_eq!(decision.sell_count, 2);
}

#[test]
fn test_tied_approval_counts_wait() {
    let mut signals: Vec<Signal> = (0..3).map(|_| buy(StrategyId::Confluence, 0.9)).collect();
    signals.extend((0..3).map(|_| sell(StrategyId::Confluence, 0.9)));
    let decision = ConsensusAggregator::default().aggregate("BTC", signals);
    assert_eq!(decision.action, ConsensusAction::Wait);
}

#[test]
fn test_approval_with_minor_opposition() {
    let decision = ConsensusAggregator::default().aggregate(
        "BTC",
        vec![
            buy(StrategyId::RsiVolume, 0.9),
            buy(StrategyId::MacdMomentum, 0.8),
            buy(StrategyId::EmaCrossover, 0.7),
            sell(StrategyId::BollingerReversion, 0.9),
            sell(StrategyId::Confluence, 0.8),
        ],
    );
    assert_eq!(decision.action, ConsensusAction::Buy);
    assert_eq!(decision.agreement_count, 3);
    assert_close(decision.average_strength, 0.8, 1e-12);
}

#[test]
fn test_no_signals_market_neutral() {
    let decision = ConsensusAggregator::default().aggregate("BTC", Vec::new());
    assert_eq!(decision.action, ConsensusAction::Wait);
    assert_eq!(decision.average_strength, 0.0);
    assert_eq!(decision.agreement_count, 0);
    assert!(decision.contributing_signals.is_empty());
    assert!(decision.rationale.contains("market neutral"));
}

#[test]
fn test_low_confidence_signals_abstain() {
    let aggregator = ConsensusAggregator::default();

    let weak: Vec<Signal> = (0..3).map(|_| buy(StrategyId::Confluence, 0.6)).collect();
    let decision = aggregator.aggregate("BTC", weak);
    assert_eq!(decision.action, ConsensusAction::Wait);
    assert_eq!(decision.buy_count, 0);
    assert_eq!(decision.contributing_signals.len(), 3);
    assert!(decision.rationale.contains("market neutral"));

    let mixed = vec![
        buy(StrategyId::RsiVolume, 0.9),
        buy(StrategyId::MacdMomentum, 0.8),
        buy(StrategyId::Confluence, 0.5),
    ];
    let decision = aggregator.aggregate("BTC", mixed);
    assert_eq!(decision.action, ConsensusAction::Review);
    assert_eq!(decision.buy_count, 2);
    assert_close(decision.average_strength, 0.85, 1e-12);
}

#[test]
fn test_custom_thresholds() {
    let aggregator = ConsensusAggregator::new(ConsensusConfig::new(2, 1, 100.0, 0.0).unwrap());
    let decision = aggregator.aggregate(
        "BTC",
        vec![buy(StrategyId::RsiVolume, 0.5), buy(StrategyId::Confluence, 0.5)],
    );
    assert_eq!(decision.action, ConsensusAction::Buy);
    assert_close(decision.recommended_size_usd.unwrap(), 50.0, 1e-12);

    let decision = aggregator.aggregate("BTC", vec![sell(StrategyId::Confluence, 0.4)]);
    assert_eq!(decision.action, ConsensusAction::Review);
}

#[test]
fn test_config_validation() {
    assert!(matches!(
        ConsensusConfig::new(2, 2, 25.0, 0.7),
        Err(ConsensusConfigError::InvalidThresholds { .. })
    ));
    assert!(matches!(
        ConsensusConfig::new(3, 0, 25.0, 0.7),
        Err(ConsensusConfigError::InvalidThresholds { .. })
    ));
    assert!(matches!(
        ConsensusConfig::new(3, 2, -1.0, 0.7),
        Err(ConsensusConfigError::InvalidPositionSize(_))
    ));
    assert!(matches!(
        ConsensusConfig::new(3, 2, 25.0, 1.5),
        Err(ConsensusConfigError::InvalidMinConfidence(_))
    ));

    let defaults = ConsensusConfig::default();
    assert_eq!(defaults.approval_threshold(), 3);
    assert_eq!(defaults.review_threshold(), 2);
    assert_eq!(defaults.position_size_usd(), 25.0);
    assert_eq!(defaults.min_confidence(), 0.70);
}

#[test]
fn test_decision_timestamp() {
    let aggregator = ConsensusAggregator::default();
    let mut late = buy(StrategyId::Confluence, 0.9);
    late.timestamp = base_time() + Duration::hours(1);
    let decision = aggregator.aggregate("BTC", vec![buy(StrategyId::RsiVolume, 0.9), late]);
    assert_eq!(decision.timestamp, base_time() + Duration::hours(1));

    let at = base_time() + Duration::days(2);
    assert_eq!(aggregator.aggregate_at("BTC", Vec::new(), at).timestamp, at);
}

use quorum::indicators::momentum::SignalLineMethod;
use quorum::models::StrategyId;
use quorum::strategies::{build_strategies, build_strategy, StrategySettings};

#[test]
fn test_build_strategy_ids() {
    let settings = StrategySettings::default();
    for id in [
        StrategyId::RsiVolume,
        StrategyId::BollingerReversion,
        StrategyId::MacdMomentum,
        StrategyId::EmaCrossover,
        StrategyId::Confluence,
        StrategyId::SmaCrossover,
    ] {
        assert_eq!(build_strategy(id, &settings).id(), id);
    }
}

#[test]
fn test_build_strategies_keeps_order_and_drops_duplicates() {
    let ids = [
        StrategyId::Confluence,
        StrategyId::RsiVolume,
        StrategyId::Confluence,
    ];
    let built: Vec<StrategyId> = build_strategies(&ids, &StrategySettings::default())
        .iter()
        .map(|s| s.id())
        .collect();
    assert_eq!(built, vec![StrategyId::Confluence, StrategyId::RsiVolume]);
}

#[test]
fn test_with_signal_line_applies_to_every_macd_consumer() {
    let settings = StrategySettings::default().with_signal_line(SignalLineMethod::Ema);
    assert_eq!(settings.macd_momentum.macd.signal_line, SignalLineMethod::Ema);
    assert_eq!(settings.confluence.macd.signal_line, SignalLineMethod::Ema);
}

#[test]
fn test_display_names_are_distinct() {
    let names: Vec<&str> = StrategyId::CORE
        .iter()
        .chain([StrategyId::SmaCrossover].iter())
        .map(|id| id.display_name())
        .collect();
    assert_eq!(names[0], "RSI + Volume");
    assert_eq!(names[4], "Multi-Indicator Confluence");
    for (i, name) in names.iter().enumerate() {
        assert!(!names[i + 1..].contains(name));
    }
}

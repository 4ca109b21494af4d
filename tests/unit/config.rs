//! Unit tests for configuration loading

use quorum::config::{Config, ConfigError};
use quorum::indicators::momentum::SignalLineMethod;
use quorum::models::StrategyId;
use std::collections::HashMap;
use std::path::PathBuf;

fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = load(&[]).unwrap();
    assert_eq!(config.environment, "sandbox");
    assert!(!config.is_production());
    assert_eq!(config.timeframe, "15m");
    assert_eq!(config.candle_limit, 288);
    assert_eq!(config.eval_interval_seconds, 900);
    assert_eq!(config.data_dir, PathBuf::from("data"));
    assert_eq!(config.strategies, StrategyId::CORE.to_vec());
    assert_eq!(config.consensus.approval_threshold(), 3);
    assert_eq!(config.consensus.review_threshold(), 2);
    assert_eq!(config.consensus.position_size_usd(), 25.0);
    assert_eq!(config.consensus.min_confidence(), 0.70);
    assert_eq!(config.strategy_settings.ema_crossover.volume_threshold, 1.3);
}

#[test]
fn test_overrides() {
    let config = load(&[
        ("APP_ENV", "Production"),
        ("MONITORED_SYMBOLS", "btc, eth ,,sol"),
        ("TIMEFRAME", "1h"),
        ("CANDLE_LIMIT", "500"),
        ("EVAL_INTERVAL_SECONDS", "60"),
        ("DATA_DIR", "/tmp/candles"),
        ("APPROVAL_THRESHOLD", "4"),
        ("REVIEW_THRESHOLD", "3"),
        ("POSITION_SIZE_USD", "100"),
        ("MIN_CONFIDENCE", "0.5"),
        ("STRATEGIES", "rsi_volume, sma, rsi-volume"),
        ("EMA_VOLUME_THRESHOLD", "1.5"),
        ("MACD_SIGNAL_LINE", "ema"),
    ])
    .unwrap();

    assert_eq!(config.environment, "production");
    assert!(config.is_production());
    assert_eq!(config.symbols, vec!["BTC", "ETH", "SOL"]);
    assert_eq!(config.timeframe, "1h");
    assert_eq!(config.candle_limit, 500);
    assert_eq!(config.eval_interval_seconds, 60);
    assert_eq!(config.data_dir, PathBuf::from("/tmp/candles"));
    assert_eq!(config.consensus.approval_threshold(), 4);
    assert_eq!(config.consensus.review_threshold(), 3);
    assert_eq!(config.consensus.position_size_usd(), 100.0);
    assert_eq!(config.consensus.min_confidence(), 0.5);
    assert_eq!(
        config.strategies,
        vec![StrategyId::RsiVolume, StrategyId::SmaCrossover]
    );
    assert_eq!(config.strategy_settings.ema_crossover.volume_threshold, 1.5);
    assert_eq!(
        config.strategy_settings.confluence.macd.signal_line,
        SignalLineMethod::Ema
    );
}

#[test]
fn test_environment_fallback() {
    let config = load(&[("ENVIRONMENT", "prod")]).unwrap();
    assert_eq!(config.environment, "prod");
    assert!(config.is_production());
}

#[test]
fn test_blank_values_use_defaults() {
    let config = load(&[("CANDLE_LIMIT", "  "), ("STRATEGIES", "")]).unwrap();
    assert_eq!(config.candle_limit, 288);
    assert_eq!(config.strategies.len(), 5);
}

#[test]
fn test_invalid_values() {
    assert_eq!(
        load(&[("CANDLE_LIMIT", "many")]).unwrap_err(),
        ConfigError::InvalidValue {
            key: "CANDLE_LIMIT",
            value: "many".to_string()
        }
    );
    assert_eq!(
        load(&[("STRATEGIES", "rsi_volume,ichimoku")]).unwrap_err(),
        ConfigError::UnknownStrategy("ichimoku".to_string())
    );
    assert!(matches!(
        load(&[("MACD_SIGNAL_LINE", "sma")]),
        Err(ConfigError::InvalidValue {
            key: "MACD_SIGNAL_LINE",
            ..
        })
    ));
    assert!(matches!(
        load(&[("APPROVAL_THRESHOLD", "2")]),
        Err(ConfigError::Consensus(_))
    ));
    assert!(matches!(
        load(&[("MIN_CONFIDENCE", "1.2")]),
        Err(ConfigError::Consensus(_))
    ));
}

#[test]
fn test_eval_interval_must_repeat_evenly() {
    for interval in ["45", "90", "3700", "5400"] {
        assert_eq!(
            load(&[("EVAL_INTERVAL_SECONDS", interval)]).unwrap_err(),
            ConfigError::InvalidValue {
                key: "EVAL_INTERVAL_SECONDS",
                value: interval.to_string()
            }
        );
    }
    assert_eq!(load(&[("EVAL_INTERVAL_SECONDS", "0")]).unwrap().eval_interval_seconds, 0);
    assert_eq!(load(&[("EVAL_INTERVAL_SECONDS", "300")]).unwrap().eval_interval_seconds, 300);
    assert_eq!(load(&[("EVAL_INTERVAL_SECONDS", "14400")]).unwrap().eval_interval_seconds, 14400);
}

//! Environment-driven configuration

use crate::core::scheduler::interval_to_cron;
use crate::indicators::momentum::SignalLineMethod;
use crate::models::strategy::StrategyId;
use crate::signals::aggregation::{
    ConsensusConfig, ConsensusConfigError, DEFAULT_APPROVAL_THRESHOLD, DEFAULT_MIN_CONFIDENCE,
    DEFAULT_POSITION_SIZE_USD, DEFAULT_REVIEW_THRESHOLD,
};
use crate::strategies::StrategySettings;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_SYMBOLS: &str = "BTC,ETH";
pub const DEFAULT_TIMEFRAME: &str = "15m";
pub const DEFAULT_CANDLE_LIMIT: usize = 288;
pub const DEFAULT_EVAL_INTERVAL_SECONDS: u64 = 900;
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
    UnknownStrategy(String),
    Consensus(ConsensusConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value '{}' for {}", value, key)
            }
            ConfigError::UnknownStrategy(name) => write!(f, "unknown strategy '{}'", name),
            ConfigError::Consensus(e) => write!(f, "invalid consensus settings: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Consensus(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConsensusConfigError> for ConfigError {
    fn from(e: ConsensusConfigError) -> Self {
        ConfigError::Consensus(e)
    }
}

/// Get the current environment name (APP_ENV, then ENVIRONMENT, default "sandbox")
pub fn get_environment() -> String {
    env::var("APP_ENV")
        .or_else(|_| env::var("ENVIRONMENT"))
        .unwrap_or_else(|_| "sandbox".to_string())
        .to_lowercase()
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: String,
    pub symbols: Vec<String>,
    pub timeframe: String,
    pub candle_limit: usize,
    pub eval_interval_seconds: u64,
    pub data_dir: PathBuf,
    /// Evaluation order of the enabled strategies
    pub strategies: Vec<StrategyId>,
    pub strategy_settings: StrategySettings,
    pub consensus: ConsensusConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "sandbox".to_string(),
            symbols: parse_list(DEFAULT_SYMBOLS),
            timeframe: DEFAULT_TIMEFRAME.to_string(),
            candle_limit: DEFAULT_CANDLE_LIMIT,
            eval_interval_seconds: DEFAULT_EVAL_INTERVAL_SECONDS,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            strategies: StrategyId::CORE.to_vec(),
            strategy_settings: StrategySettings::default(),
            consensus: ConsensusConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Unset variables fall back to the defaults; set but malformed ones are
    /// an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = get("APP_ENV")
            .or_else(|| get("ENVIRONMENT"))
            .map(|v| v.to_lowercase())
            .unwrap_or(defaults.environment);

        let symbols = get("MONITORED_SYMBOLS")
            .map(|v| parse_list(&v))
            .unwrap_or(defaults.symbols);

        let strategies = match get("STRATEGIES") {
            Some(v) => parse_strategies(&v)?,
            None => defaults.strategies,
        };

        let mut strategy_settings = defaults.strategy_settings;
        if let Some(threshold) = parse_var::<f64>(&get, "EMA_VOLUME_THRESHOLD")? {
            strategy_settings.ema_crossover.volume_threshold = threshold;
        }
        if let Some(v) = get("MACD_SIGNAL_LINE") {
            let method = parse_signal_line(&v).ok_or(ConfigError::InvalidValue {
                key: "MACD_SIGNAL_LINE",
                value: v,
            })?;
            strategy_settings = strategy_settings.with_signal_line(method);
        }

        let consensus = ConsensusConfig::new(
            parse_var(&get, "APPROVAL_THRESHOLD")?.unwrap_or(DEFAULT_APPROVAL_THRESHOLD),
            parse_var(&get, "REVIEW_THRESHOLD")?.unwrap_or(DEFAULT_REVIEW_THRESHOLD),
            parse_var(&get, "POSITION_SIZE_USD")?.unwrap_or(DEFAULT_POSITION_SIZE_USD),
            parse_var(&get, "MIN_CONFIDENCE")?.unwrap_or(DEFAULT_MIN_CONFIDENCE),
        )?;

        // 0 disables scheduling; any other value must map onto an even cron step
        let eval_interval_seconds: u64 = parse_var(&get, "EVAL_INTERVAL_SECONDS")?
            .unwrap_or(defaults.eval_interval_seconds);
        if eval_interval_seconds != 0 && interval_to_cron(eval_interval_seconds).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "EVAL_INTERVAL_SECONDS",
                value: eval_interval_seconds.to_string(),
            });
        }

        Ok(Self {
            environment,
            symbols,
            timeframe: get("TIMEFRAME").unwrap_or(defaults.timeframe),
            candle_limit: parse_var(&get, "CANDLE_LIMIT")?.unwrap_or(defaults.candle_limit),
            eval_interval_seconds,
            data_dir: get("DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            strategies,
            strategy_settings,
            consensus,
        })
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.as_str(), "production" | "prod")
    }
}

fn parse_var<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value }),
        None => Ok(None),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_strategies(value: &str) -> Result<Vec<StrategyId>, ConfigError> {
    let mut ids = Vec::new();
    for name in value.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let id = name
            .parse::<StrategyId>()
            .map_err(|_| ConfigError::UnknownStrategy(name.to_string()))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    if ids.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: "STRATEGIES",
            value: value.to_string(),
        });
    }
    Ok(ids)
}

fn parse_signal_line(value: &str) -> Option<SignalLineMethod> {
    match value.trim().to_lowercase().as_str() {
        "ratio" | "fixed_ratio" => Some(SignalLineMethod::default()),
        "ema" => Some(SignalLineMethod::Ema),
        _ => None,
    }
}

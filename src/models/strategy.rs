//! Strategy identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies the evaluator that produced a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyId {
    RsiVolume,
    BollingerReversion,
    MacdMomentum,
    EmaCrossover,
    Confluence,
    SmaCrossover,
}

impl StrategyId {
    /// The default evaluation order
    pub const CORE: [StrategyId; 5] = [
        StrategyId::RsiVolume,
        StrategyId::BollingerReversion,
        StrategyId::MacdMomentum,
        StrategyId::EmaCrossover,
        StrategyId::Confluence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyId::RsiVolume => "rsi_volume",
            StrategyId::BollingerReversion => "bollinger_reversion",
            StrategyId::MacdMomentum => "macd_momentum",
            StrategyId::EmaCrossover => "ema_crossover",
            StrategyId::Confluence => "confluence",
            StrategyId::SmaCrossover => "sma_crossover",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            StrategyId::RsiVolume => "RSI + Volume",
            StrategyId::BollingerReversion => "Bollinger Mean Reversion",
            StrategyId::MacdMomentum => "MACD Momentum",
            StrategyId::EmaCrossover => "EMA Triple Crossover",
            StrategyId::Confluence => "Multi-Indicator Confluence",
            StrategyId::SmaCrossover => "SMA Crossover",
        }
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "rsi_volume" => Ok(StrategyId::RsiVolume),
            "bollinger_reversion" | "bollinger" => Ok(StrategyId::BollingerReversion),
            "macd_momentum" | "macd" => Ok(StrategyId::MacdMomentum),
            "ema_crossover" | "ema" => Ok(StrategyId::EmaCrossover),
            "confluence" => Ok(StrategyId::Confluence),
            "sma_crossover" | "sma" => Ok(StrategyId::SmaCrossover),
            other => Err(format!("unknown strategy '{}'", other)),
        }
    }
}

use crate::models::strategy::StrategyId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalDirection {
    Buy,
    Sell,
}

impl SignalDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalDirection::Buy => "BUY",
            SignalDirection::Sell => "SELL",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            SignalDirection::Buy => SignalDirection::Sell,
            SignalDirection::Sell => SignalDirection::Buy,
        }
    }
}

impl fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One component of a signal's strength
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalReason {
    pub description: String,
    pub weight: f64,
}

impl SignalReason {
    pub fn new(description: impl Into<String>, weight: f64) -> Self {
        Self {
            description: description.into(),
            weight,
        }
    }
}

/// Directional opinion of one strategy for one cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub strategy: StrategyId,
    pub direction: SignalDirection,
    pub strength: f64,
    pub reasons: Vec<SignalReason>,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    /// Build a signal, clamping `strength` into [0, 1]
    pub fn new(
        strategy: StrategyId,
        direction: SignalDirection,
        strength: f64,
        reasons: Vec<SignalReason>,
        price: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            strategy,
            direction,
            strength: clamp_strength(strength),
            reasons,
            price,
            timestamp,
        }
    }

    /// Position size scaled by strength
    pub fn recommended_size(&self, position_size_usd: f64) -> f64 {
        position_size_usd * self.strength
    }

    /// Reasons joined into one line
    pub fn rationale(&self) -> String {
        self.reasons
            .iter()
            .map(|r| r.description.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Cap at exactly 1.0 and floor at 0.0; NaN collapses to 0.0
pub fn clamp_strength(strength: f64) -> f64 {
    if strength.is_nan() {
        return 0.0;
    }
    strength.clamp(0.0, 1.0)
}

use crate::models::signal::{Signal, SignalDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConsensusAction {
    Buy,
    Sell,
    Review,
    Wait,
}

impl ConsensusAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusAction::Buy => "BUY",
            ConsensusAction::Sell => "SELL",
            ConsensusAction::Review => "REVIEW",
            ConsensusAction::Wait => "WAIT",
        }
    }
}

impl From<SignalDirection> for ConsensusAction {
    fn from(direction: SignalDirection) -> Self {
        match direction {
            SignalDirection::Buy => ConsensusAction::Buy,
            SignalDirection::Sell => ConsensusAction::Sell,
        }
    }
}

impl fmt::Display for ConsensusAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merged recommendation for one instrument and one cycle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusDecision {
    pub symbol: String,
    pub action: ConsensusAction,
    /// Leading direction for BUY, SELL and REVIEW decisions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<SignalDirection>,
    pub average_strength: f64,
    pub agreement_count: usize,
    pub buy_count: usize,
    pub sell_count: usize,
    pub contributing_signals: Vec<Signal>,
    /// Only set for approved BUY/SELL decisions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_size_usd: Option<f64>,
    pub rationale: String,
    pub timestamp: DateTime<Utc>,
}

impl ConsensusDecision {
    /// BUY or SELL, approved for execution
    pub fn is_approved(&self) -> bool {
        matches!(self.action, ConsensusAction::Buy | ConsensusAction::Sell)
    }

    pub fn is_actionable(&self) -> bool {
        self.action != ConsensusAction::Wait
    }
}

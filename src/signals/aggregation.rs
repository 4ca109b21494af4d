//! Consensus aggregation across strategy signals

use crate::models::consensus::{ConsensusAction, ConsensusDecision};
use crate::models::signal::{Signal, SignalDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Agreeing signals needed for a BUY/SELL approved for execution
pub const DEFAULT_APPROVAL_THRESHOLD: usize = 3;
/// Agreeing signals needed for a manual REVIEW
pub const DEFAULT_REVIEW_THRESHOLD: usize = 2;
pub const DEFAULT_POSITION_SIZE_USD: f64 = 25.0;
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.70;

#[derive(Debug, Clone, PartialEq)]
pub enum ConsensusConfigError {
    InvalidThresholds { approval: usize, review: usize },
    InvalidPositionSize(f64),
    InvalidMinConfidence(f64),
}

impl fmt::Display for ConsensusConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsensusConfigError::InvalidThresholds { approval, review } => write!(
                f,
                "review threshold ({}) must be at least 1 and below the approval threshold ({})",
                review, approval
            ),
            ConsensusConfigError::InvalidPositionSize(size) => {
                write!(f, "position size must be a non-negative amount, got {}", size)
            }
            ConsensusConfigError::InvalidMinConfidence(value) => {
                write!(f, "minimum confidence must be within [0, 1], got {}", value)
            }
        }
    }
}

impl std::error::Error for ConsensusConfigError {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsensusConfig {
    approval_threshold: usize,
    review_threshold: usize,
    position_size_usd: f64,
    min_confidence: f64,
}

impl ConsensusConfig {
    pub fn new(
        approval_threshold: usize,
        review_threshold: usize,
        position_size_usd: f64,
        min_confidence: f64,
    ) -> Result<Self, ConsensusConfigError> {
        if review_threshold == 0 || review_threshold >= approval_threshold {
            return Err(ConsensusConfigError::InvalidThresholds {
                approval: approval_threshold,
                review: review_threshold,
            });
        }
        if !position_size_usd.is_finite() || position_size_usd < 0.0 {
            return Err(ConsensusConfigError::InvalidPositionSize(position_size_usd));
        }
        if !(0.0..=1.0).contains(&min_confidence) {
            return Err(ConsensusConfigError::InvalidMinConfidence(min_confidence));
        }

        Ok(Self {
            approval_threshold,
            review_threshold,
            position_size_usd,
            min_confidence,
        })
    }

    pub fn approval_threshold(&self) -> usize {
        self.approval_threshold
    }

    pub fn review_threshold(&self) -> usize {
        self.review_threshold
    }

    pub fn position_size_usd(&self) -> f64 {
        self.position_size_usd
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            approval_threshold: DEFAULT_APPROVAL_THRESHOLD,
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
            position_size_usd: DEFAULT_POSITION_SIZE_USD,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Merges the signals of one instrument and one cycle into a decision
#[derive(Debug, Clone, Default)]
pub struct ConsensusAggregator {
    config: ConsensusConfig,
}

impl ConsensusAggregator {
    pub fn new(config: ConsensusConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    pub fn aggregate(&self, symbol: &str, signals: Vec<Signal>) -> ConsensusDecision {
        let timestamp = signals
            .iter()
            .map(|s| s.timestamp)
            .max()
            .unwrap_or_else(Utc::now);
        self.aggregate_at(symbol, signals, timestamp)
    }

    /// Aggregate with an explicit decision timestamp.
    ///
    /// Policy, first match wins:
    /// 1. no eligible signal: WAIT, market neutral
    /// 2. one side reaches the approval threshold alone: BUY/SELL, approved
    /// 3. one side reaches the review threshold while the other does not: REVIEW
    /// 4. otherwise WAIT
    pub fn aggregate_at(
        &self,
        symbol: &str,
        signals: Vec<Signal>,
        timestamp: DateTime<Utc>,
    ) -> ConsensusDecision {
        let cfg = &self.config;
        let strengths_for = |direction: SignalDirection| -> Vec<f64> {
            signals
                .iter()
                .filter(|s| s.direction == direction && s.strength >= cfg.min_confidence)
                .map(|s| s.strength)
                .collect()
        };
        let buys = strengths_for(SignalDirection::Buy);
        let sells = strengths_for(SignalDirection::Sell);
        let (buy_count, sell_count) = (buys.len(), sells.len());

        let mut decision = ConsensusDecision {
            symbol: symbol.to_string(),
            action: ConsensusAction::Wait,
            direction: None,
            average_strength: 0.0,
            agreement_count: buy_count.max(sell_count),
            buy_count,
            sell_count,
            contributing_signals: Vec::new(),
            recommended_size_usd: None,
            rationale: String::new(),
            timestamp,
        };

        if buy_count + sell_count == 0 {
            decision.rationale = if signals.is_empty() {
                "No strategy produced a signal, market neutral".to_string()
            } else {
                format!(
                    "No signal reached the {:.0}% confidence floor, market neutral",
                    cfg.min_confidence * 100.0
                )
            };
            decision.contributing_signals = signals;
            return decision;
        }

        let leading = if buy_count >= cfg.approval_threshold && sell_count < cfg.approval_threshold {
            Some((SignalDirection::Buy, buys, ConsensusAction::Buy))
        } else if sell_count >= cfg.approval_threshold && buy_count < cfg.approval_threshold {
            Some((SignalDirection::Sell, sells, ConsensusAction::Sell))
        } else if buy_count >= cfg.review_threshold && sell_count < cfg.review_threshold {
            Some((SignalDirection::Buy, buys, ConsensusAction::Review))
        } else if sell_count >= cfg.review_threshold && buy_count < cfg.review_threshold {
            Some((SignalDirection::Sell, sells, ConsensusAction::Review))
        } else {
            None
        };

        match leading {
            Some((direction, strengths, action)) => {
                let average = ordered_mean(strengths);
                decision.action = action;
                decision.direction = Some(direction);
                decision.average_strength = average;
                decision.agreement_count = match direction {
                    SignalDirection::Buy => buy_count,
                    SignalDirection::Sell => sell_count,
                };

                if action == ConsensusAction::Review {
                    decision.rationale = format!(
                        "{} strategies agree on {} (avg strength {:.1}%), moderate consensus, manual review required",
                        decision.agreement_count,
                        direction,
                        average * 100.0
                    );
                } else {
                    let size = cfg.position_size_usd * average;
                    decision.recommended_size_usd = Some(size);
                    decision.rationale = format!(
                        "{} strategies agree on {} (avg strength {:.1}%), strong consensus, approved for execution at ${:.2}",
                        decision.agreement_count,
                        direction,
                        average * 100.0,
                        size
                    );
                }
            }
            None => {
                decision.rationale = format!(
                    "No consensus ({} BUY vs {} SELL)",
                    buy_count, sell_count
                );
            }
        }

        decision.contributing_signals = signals;
        decision
    }
}

/// Mean summed in ascending order so the result does not depend on the
/// order signals arrived in
fn ordered_mean(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    values.iter().sum::<f64>() / values.len() as f64
}

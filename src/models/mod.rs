//! Shared data models spanning the engine layers.

pub mod consensus;
pub mod indicators;
pub mod series;
pub mod signal;
pub mod strategy;

pub use consensus::{ConsensusAction, ConsensusDecision};
pub use indicators::{
    BollingerBandsIndicator, Candle, EmaIndicator, IndicatorSnapshot, MacdIndicator, RsiIndicator,
    SmaIndicator, VolumeIndicator,
};
pub use series::{PriceSeries, ValidationError};
pub use signal::{clamp_strength, Signal, SignalDirection, SignalReason};
pub use strategy::StrategyId;

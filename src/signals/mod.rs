//! Consensus aggregation and the signal engine.

pub mod aggregation;
pub mod engine;

pub use aggregation::*;
pub use engine::{SignalEngine, StrategyOutcome};

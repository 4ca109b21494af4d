//! Quorum: technical indicators, strategy evaluators and a consensus
//! aggregator that turns a candle series into one trading decision.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
pub mod strategies;

pub use config::Config;
pub use models::{Candle, ConsensusAction, ConsensusDecision, PriceSeries, Signal, SignalDirection};
pub use signals::engine::SignalEngine;

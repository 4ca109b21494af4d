//! Signal engine: runs every configured strategy over a series and merges
//! the results into one consensus decision.

use crate::config::Config;
use crate::indicators::momentum::MacdParams;
use crate::indicators::snapshot::compute_snapshot;
use crate::models::consensus::ConsensusDecision;
use crate::models::indicators::{Candle, IndicatorSnapshot};
use crate::models::series::{PriceSeries, ValidationError};
use crate::models::signal::Signal;
use crate::models::strategy::StrategyId;
use crate::signals::aggregation::{ConsensusAggregator, ConsensusConfig};
use crate::strategies::{build_strategies, StrategyEvaluator, StrategySettings};
use tracing::debug;

/// Outcome of one strategy for one cycle
#[derive(Debug, Clone)]
pub struct StrategyOutcome {
    pub strategy: StrategyId,
    /// `None` when the strategy abstained
    pub signal: Option<Signal>,
}

pub struct SignalEngine {
    strategies: Vec<Box<dyn StrategyEvaluator>>,
    aggregator: ConsensusAggregator,
    snapshot_macd: MacdParams,
}

impl SignalEngine {
    pub fn new(config: &Config) -> Self {
        Self::with_parts(
            build_strategies(&config.strategies, &config.strategy_settings),
            ConsensusAggregator::new(config.consensus),
        )
        .with_snapshot_macd(config.strategy_settings.macd_momentum.macd)
    }

    /// The five core strategies with default parameters
    pub fn with_defaults() -> Self {
        Self::with_parts(
            build_strategies(&StrategyId::CORE, &StrategySettings::default()),
            ConsensusAggregator::new(ConsensusConfig::default()),
        )
    }

    /// Strategies run, and contribute signals, in the order given
    pub fn with_parts(
        strategies: Vec<Box<dyn StrategyEvaluator>>,
        aggregator: ConsensusAggregator,
    ) -> Self {
        Self {
            strategies,
            aggregator,
            snapshot_macd: MacdParams::default(),
        }
    }

    pub fn with_snapshot_macd(mut self, macd: MacdParams) -> Self {
        self.snapshot_macd = macd;
        self
    }

    pub fn strategy_ids(&self) -> Vec<StrategyId> {
        self.strategies.iter().map(|s| s.id()).collect()
    }

    pub fn aggregator(&self) -> &ConsensusAggregator {
        &self.aggregator
    }

    /// Evaluate each strategy in order, recording abstentions
    pub fn run_strategies(&self, series: &PriceSeries) -> Vec<StrategyOutcome> {
        self.strategies
            .iter()
            .map(|strategy| {
                let signal = strategy.evaluate(series);
                match &signal {
                    Some(s) => debug!(
                        symbol = %series.symbol(),
                        strategy = %s.strategy,
                        name = s.strategy.display_name(),
                        direction = %s.direction,
                        strength = s.strength,
                        "Strategy emitted signal"
                    ),
                    None => debug!(
                        symbol = %series.symbol(),
                        strategy = %strategy.id(),
                        name = strategy.id().display_name(),
                        candles = series.len(),
                        min_candles = strategy.min_candles(),
                        "Strategy abstained"
                    ),
                }
                StrategyOutcome {
                    strategy: strategy.id(),
                    signal,
                }
            })
            .collect()
    }

    pub fn evaluate(&self, series: &PriceSeries) -> ConsensusDecision {
        self.decide(series, self.run_strategies(series))
    }

    /// Validate raw candles, then evaluate
    pub fn evaluate_candles(
        &self,
        symbol: &str,
        candles: Vec<Candle>,
    ) -> Result<ConsensusDecision, ValidationError> {
        let series = PriceSeries::new(symbol, candles)?;
        Ok(self.evaluate(&series))
    }

    /// Decision plus the indicator values for the latest candle
    pub fn evaluate_with_snapshot(
        &self,
        series: &PriceSeries,
    ) -> (ConsensusDecision, IndicatorSnapshot) {
        (self.evaluate(series), compute_snapshot(series, &self.snapshot_macd))
    }

    /// Aggregate outcomes already produced by `run_strategies`
    pub fn decide(&self, series: &PriceSeries, outcomes: Vec<StrategyOutcome>) -> ConsensusDecision {
        let signals: Vec<Signal> = outcomes.into_iter().filter_map(|o| o.signal).collect();
        self.aggregator
            .aggregate_at(series.symbol(), signals, series.latest().timestamp)
    }
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

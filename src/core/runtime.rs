//! Evaluation runtime: fetches candles for each monitored symbol and runs
//! the signal engine on them concurrently.

use crate::config::DEFAULT_TIMEFRAME;
use crate::metrics::Metrics;
use crate::models::consensus::ConsensusDecision;
use crate::models::series::{PriceSeries, ValidationError};
use crate::services::market_data::MarketDataProvider;
use crate::signals::engine::SignalEngine;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

#[derive(Debug)]
pub enum RuntimeError {
    MarketData(String),
    Validation(ValidationError),
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::MarketData(msg) => write!(f, "market data error: {}", msg),
            RuntimeError::Validation(e) => write!(f, "invalid price series: {}", e),
        }
    }
}

impl std::error::Error for RuntimeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RuntimeError::Validation(e) => Some(e),
            RuntimeError::MarketData(_) => None,
        }
    }
}

impl From<ValidationError> for RuntimeError {
    fn from(e: ValidationError) -> Self {
        RuntimeError::Validation(e)
    }
}

/// Result of one cycle for one symbol
pub type SymbolOutcome = (String, Result<ConsensusDecision, RuntimeError>);

#[derive(Clone)]
pub struct ConsensusRuntime {
    provider: Arc<dyn MarketDataProvider>,
    engine: Arc<SignalEngine>,
    symbols: Vec<String>,
    timeframe: String,
    candle_limit: usize,
    metrics: Option<Arc<Metrics>>,
}

impl ConsensusRuntime {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        engine: Arc<SignalEngine>,
        symbols: Vec<String>,
        candle_limit: usize,
    ) -> Self {
        Self {
            provider,
            engine,
            symbols,
            timeframe: DEFAULT_TIMEFRAME.to_string(),
            candle_limit,
            metrics: None,
        }
    }

    /// Candle resolution requested from the provider
    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = timeframe.into();
        self
    }

    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Fetch, validate and evaluate one symbol
    pub async fn evaluate_symbol(&self, symbol: &str) -> Result<ConsensusDecision, RuntimeError> {
        let start = Instant::now();
        if let Some(metrics) = &self.metrics {
            metrics.cycles_active.inc();
        }

        let result = self.run_cycle(symbol).await;

        if let Some(metrics) = &self.metrics {
            metrics.cycles_active.dec();
            metrics
                .cycle_duration_seconds
                .observe(start.elapsed().as_secs_f64());
            match &result {
                Ok(decision) => {
                    metrics.cycles_total.inc();
                    metrics
                        .decisions_total
                        .with_label_values(&[decision.action.as_str()])
                        .inc();
                }
                Err(_) => metrics.cycle_failures_total.inc(),
            }
        }

        match &result {
            Ok(decision) => info!(
                symbol = %symbol,
                timeframe = %self.timeframe,
                action = %decision.action,
                buy = decision.buy_count,
                sell = decision.sell_count,
                strength = decision.average_strength,
                "{}",
                decision.rationale
            ),
            Err(e) => error!(
                symbol = %symbol,
                timeframe = %self.timeframe,
                error = %e,
                "Evaluation cycle failed"
            ),
        }

        result
    }

    async fn run_cycle(&self, symbol: &str) -> Result<ConsensusDecision, RuntimeError> {
        let candles = self
            .provider
            .get_candles(symbol, &self.timeframe, self.candle_limit)
            .await
            .map_err(|e| RuntimeError::MarketData(e.to_string()))?;
        let series = PriceSeries::new(symbol, candles)?;

        let outcomes = self.engine.run_strategies(&series);
        if let Some(metrics) = &self.metrics {
            for outcome in &outcomes {
                match &outcome.signal {
                    Some(signal) => metrics
                        .signals_total
                        .with_label_values(&[signal.strategy.as_str(), signal.direction.as_str()])
                        .inc(),
                    None => metrics
                        .abstentions_total
                        .with_label_values(&[outcome.strategy.as_str()])
                        .inc(),
                }
            }
        }

        Ok(self.engine.decide(&series, outcomes))
    }

    /// Evaluate every monitored symbol, each in its own task.
    ///
    /// Failures are logged and returned alongside the successes; one failing
    /// symbol never stops the others.
    pub async fn evaluate_all(&self) -> Vec<SymbolOutcome> {
        let mut tasks = JoinSet::new();
        for symbol in &self.symbols {
            let runtime = self.clone();
            let symbol = symbol.clone();
            tasks.spawn(async move {
                let result = runtime.evaluate_symbol(&symbol).await;
                (symbol, result)
            });
        }

        let mut outcomes = Vec::with_capacity(self.symbols.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => warn!(error = %e, "Evaluation task did not complete"),
            }
        }
        outcomes
    }
}

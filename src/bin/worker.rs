//! Quorum Worker
//!
//! Loads candles for every monitored symbol from `DATA_DIR` on a fixed
//! interval and logs one consensus decision per symbol.

use dotenvy::dotenv;
use quorum::config::Config;
use quorum::core::runtime::ConsensusRuntime;
use quorum::core::scheduler::EvaluationScheduler;
use quorum::logging;
use quorum::metrics::Metrics;
use quorum::services::market_data::{JsonFileMarketDataProvider, MarketDataProvider};
use quorum::signals::engine::SignalEngine;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = Config::from_env()?;
    info!("Starting Quorum Worker");
    info!(environment = %config.environment, "Environment");

    if config.eval_interval_seconds == 0 {
        return Err("EVAL_INTERVAL_SECONDS must be > 0 for worker".into());
    }
    if config.symbols.is_empty() {
        warn!("No symbols configured - set MONITORED_SYMBOLS");
    }

    info!(
        symbols = ?config.symbols,
        timeframe = %config.timeframe,
        candle_limit = config.candle_limit,
        strategies = ?config.strategies,
        approval_threshold = config.consensus.approval_threshold(),
        review_threshold = config.consensus.review_threshold(),
        "Worker configuration"
    );

    let metrics = Arc::new(Metrics::new()?);
    let provider: Arc<dyn MarketDataProvider> =
        Arc::new(JsonFileMarketDataProvider::new(config.data_dir.clone()));
    let engine = Arc::new(SignalEngine::new(&config));

    let runtime = ConsensusRuntime::new(
        provider,
        engine,
        config.symbols.clone(),
        config.candle_limit,
    )
    .with_timeframe(config.timeframe.clone())
    .with_metrics(metrics.clone());

    // Run one cycle immediately rather than waiting for the first tick
    runtime.evaluate_all().await;

    let scheduler = EvaluationScheduler::new(runtime, config.eval_interval_seconds)
        .map_err(|e| format!("Failed to create scheduler: {}", e))?;
    scheduler
        .start()
        .await
        .map_err(|e| format!("Failed to start scheduler: {}", e))?;

    info!("Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;

    info!("Shutting down worker...");
    scheduler.stop().await;
    match metrics.export() {
        Ok(text) => info!(metrics = %text, "Final metrics"),
        Err(e) => warn!(error = %e, "Failed to export metrics"),
    }
    info!("Worker stopped");

    Ok(())
}

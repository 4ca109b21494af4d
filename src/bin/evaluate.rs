//! Evaluate a single candle file and print the consensus decision as JSON.
//!
//! Usage: evaluate <candles.json> [SYMBOL] [--snapshot]

use dotenvy::dotenv;
use quorum::config::Config;
use quorum::logging;
use quorum::models::{Candle, PriceSeries};
use quorum::signals::engine::SignalEngine;
use std::env;
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    let with_snapshot = args.iter().any(|a| a == "--snapshot");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    let path = positional
        .first()
        .ok_or("usage: evaluate <candles.json> [SYMBOL] [--snapshot]")?;
    let symbol = match positional.get(1) {
        Some(s) => s.to_uppercase(),
        None => Path::new(path.as_str())
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_uppercase(),
    };

    let config = Config::from_env()?;
    let raw = tokio::fs::read_to_string(path.as_str()).await?;
    let candles: Vec<Candle> = serde_json::from_str(&raw)?;
    let series = PriceSeries::new(symbol.as_str(), candles)?;
    info!(symbol = %symbol, candles = series.len(), "Evaluating");

    let engine = SignalEngine::new(&config);
    let output = if with_snapshot {
        let (decision, snapshot) = engine.evaluate_with_snapshot(&series);
        serde_json::to_string_pretty(&serde_json::json!({
            "decision": decision,
            "snapshot": snapshot,
        }))?
    } else {
        serde_json::to_string_pretty(&engine.evaluate(&series))?
    };
    println!("{}", output);

    Ok(())
}

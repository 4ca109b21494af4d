//! Market data provider interface and local providers.

use crate::models::indicators::Candle;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::debug;

pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get the most recent `limit` candles for a symbol at `timeframe`
    /// (e.g. `15m`), oldest first
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError>;
}

fn take_last(mut candles: Vec<Candle>, limit: usize) -> Vec<Candle> {
    candles.sort_by_key(|c| c.timestamp);
    if candles.len() > limit {
        candles.drain(..candles.len() - limit);
    }
    candles
}

/// Candle buffers held in memory, one per symbol.
///
/// The buffer is served for whatever timeframe is requested; callers load
/// the resolution they evaluate.
#[derive(Default)]
pub struct InMemoryMarketDataProvider {
    candles: RwLock<HashMap<String, Vec<Candle>>>,
}

impl InMemoryMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the buffer for a symbol
    pub async fn insert(&self, symbol: &str, candles: Vec<Candle>) {
        self.candles
            .write()
            .await
            .insert(symbol.to_uppercase(), candles);
    }

    pub async fn push(&self, symbol: &str, candle: Candle) {
        self.candles
            .write()
            .await
            .entry(symbol.to_uppercase())
            .or_default()
            .push(candle);
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for InMemoryMarketDataProvider {
    async fn get_candles(
        &self,
        symbol: &str,
        _timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let candles = self.candles.read().await;
        let buffer = candles
            .get(&symbol.to_uppercase())
            .ok_or_else(|| format!("no candles for {}", symbol))?;
        Ok(take_last(buffer.clone(), limit))
    }
}

/// Reads `<dir>/<SYMBOL>_<timeframe>.json`, falling back to
/// `<dir>/<SYMBOL>.json`. Each file is a JSON array of candles.
pub struct JsonFileMarketDataProvider {
    dir: PathBuf,
}

impl JsonFileMarketDataProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, symbol: &str, timeframe: &str) -> PathBuf {
        self.dir
            .join(format!("{}_{}.json", symbol.to_uppercase(), timeframe))
    }

    pub fn fallback_path_for(&self, symbol: &str) -> PathBuf {
        self.dir.join(format!("{}.json", symbol.to_uppercase()))
    }

    async fn resolve(&self, symbol: &str, timeframe: &str) -> PathBuf {
        let path = self.path_for(symbol, timeframe);
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            path
        } else {
            self.fallback_path_for(symbol)
        }
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for JsonFileMarketDataProvider {
    async fn get_candles(
        &self,
        symbol: &str,
        timeframe: &str,
        limit: usize,
    ) -> Result<Vec<Candle>, ProviderError> {
        let path = self.resolve(symbol, timeframe).await;
        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        let candles: Vec<Candle> = serde_json::from_str(&raw)
            .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;

        debug!(
            symbol = %symbol,
            timeframe = %timeframe,
            path = %path.display(),
            count = candles.len(),
            "Loaded candles from file"
        );
        Ok(take_last(candles, limit))
    }
}

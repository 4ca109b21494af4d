//! Unit tests for market data providers

use crate::support::{candles_from, linear_closes, volumes_with_last};
use quorum::services::market_data::{
    InMemoryMarketDataProvider, JsonFileMarketDataProvider, MarketDataProvider,
};
use std::path::PathBuf;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("quorum-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn test_in_memory_returns_latest_candles() {
    let provider = InMemoryMarketDataProvider::new();
    let candles = candles_from(&linear_closes(100, 100.0, 1.0), &volumes_with_last(100, 1000.0));
    provider.insert("btc", candles.clone()).await;

    let latest = provider.get_candles("BTC", "15m", 60).await.unwrap();
    assert_eq!(latest.len(), 60);
    assert_eq!(latest.first().unwrap(), &candles[40]);
    assert_eq!(latest.last().unwrap(), &candles[99]);

    let all = provider.get_candles("btc", "15m", 500).await.unwrap();
    assert_eq!(all.len(), 100);
}

#[tokio::test]
async fn test_in_memory_push_and_missing_symbol() {
    let provider = InMemoryMarketDataProvider::new();
    assert!(provider.get_candles("ETH", "15m", 10).await.is_err());

    for candle in candles_from(&[10.0, 11.0], &[5.0, 6.0]) {
        provider.push("ETH", candle).await;
    }
    let candles = provider.get_candles("ETH", "15m", 10).await.unwrap();
    assert_eq!(candles.len(), 2);
    assert_eq!(candles.last().unwrap().close, 11.0);
}

#[tokio::test]
async fn test_json_file_provider() {
    let dir = temp_dir("json-provider");
    let candles = candles_from(&linear_closes(80, 50.0, 0.5), &volumes_with_last(80, 1500.0));
    std::fs::write(dir.join("SOL.json"), serde_json::to_string(&candles).unwrap()).unwrap();

    let provider = JsonFileMarketDataProvider::new(&dir);
    assert_eq!(provider.fallback_path_for("sol"), dir.join("SOL.json"));
    assert_eq!(provider.path_for("sol", "1h"), dir.join("SOL_1h.json"));

    let loaded = provider.get_candles("sol", "15m", 50).await.unwrap();
    assert_eq!(loaded.len(), 50);
    assert_eq!(loaded[0].timestamp, candles[30].timestamp);
    assert_eq!(loaded.last().unwrap().timestamp, candles[79].timestamp);
    assert_eq!(loaded.last().unwrap().close, 89.5);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_json_file_provider_prefers_timeframe_file() {
    let dir = temp_dir("json-timeframe");
    let fifteen = candles_from(&linear_closes(30, 10.0, 1.0), &volumes_with_last(30, 100.0));
    let hourly = candles_from(&linear_closes(30, 500.0, 1.0), &volumes_with_last(30, 100.0));
    std::fs::write(dir.join("ETH.json"), serde_json::to_string(&fifteen).unwrap()).unwrap();
    std::fs::write(dir.join("ETH_1h.json"), serde_json::to_string(&hourly).unwrap()).unwrap();

    let provider = JsonFileMarketDataProvider::new(&dir);
    let one_hour = provider.get_candles("eth", "1h", 5).await.unwrap();
    assert_eq!(one_hour.last().unwrap().close, 529.0);
    let fallback = provider.get_candles("eth", "4h", 5).await.unwrap();
    assert_eq!(fallback.last().unwrap().close, 39.0);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_json_file_provider_errors() {
    let dir = temp_dir("json-errors");
    std::fs::write(dir.join("BAD.json"), "{not json").unwrap();

    let provider = JsonFileMarketDataProvider::new(&dir);
    let missing = provider.get_candles("NONE", "15m", 10).await.unwrap_err();
    assert!(missing.to_string().contains("failed to read"));
    let bad = provider.get_candles("BAD", "15m", 10).await.unwrap_err();
    assert!(bad.to_string().contains("failed to parse"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_provider_as_trait_object() {
    let provider: Box<dyn MarketDataProvider> = Box::new(InMemoryMarketDataProvider::new());
    let result = tokio_test::block_on(provider.get_candles("BTC", "15m", 1));
    assert!(result.is_err());
}

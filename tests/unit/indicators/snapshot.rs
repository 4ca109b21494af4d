use crate::support::rising_series;
use quorum::indicators::compute_snapshot;
use quorum::indicators::momentum::MacdParams;

#[test]
fn test_snapshot_full_history() {
    let series = rising_series(60, 2.0);
    let snapshot = compute_snapshot(&series, &MacdParams::default());

    assert_eq!(snapshot.symbol, "BTC");
    assert_eq!(snapshot.price, 159.0);
    assert_eq!(snapshot.timestamp, series.latest().timestamp);
    assert_eq!(snapshot.rsi.map(|r| r.value), Some(100.0));
    assert!(snapshot.sma.is_some());
    assert_eq!(snapshot.emas.len(), 3);
    assert!(snapshot.ema(9).unwrap() > snapshot.ema(50).unwrap());
    assert!(snapshot.bollinger.is_some());
    assert!(snapshot.macd.is_some());
    assert!(snapshot.volume.unwrap().ratio > 1.9);
}

#[test]
fn test_snapshot_short_history() {
    let series = rising_series(10, 1.0);
    let snapshot = compute_snapshot(&series, &MacdParams::default());

    assert!(snapshot.rsi.is_none());
    assert!(snapshot.sma.is_none());
    assert_eq!(snapshot.emas.len(), 1);
    assert_eq!(snapshot.ema(21), None);
    assert!(snapshot.bollinger.is_none());
    assert!(snapshot.macd.is_none());
    assert!(snapshot.volume.is_none());

    let json = serde_json::to_value(&snapshot).unwrap();
    assert!(json.get("rsi").is_none());
}

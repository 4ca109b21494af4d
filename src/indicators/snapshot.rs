//! Indicator values for the latest candle of a series

use crate::indicators::momentum::{calculate_macd_with, calculate_rsi, MacdParams, DEFAULT_RSI_PERIOD};
use crate::indicators::trend::{calculate_emas, calculate_sma};
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::indicators::volume::{calculate_volume_ratio, DEFAULT_VOLUME_MA_PERIOD};
use crate::models::indicators::IndicatorSnapshot;
use crate::models::series::PriceSeries;

pub const SNAPSHOT_EMA_PERIODS: [u32; 3] = [9, 21, 50];
pub const SNAPSHOT_SMA_PERIOD: u32 = 20;

/// Compute every indicator the series is long enough for
pub fn compute_snapshot(series: &PriceSeries, macd: &MacdParams) -> IndicatorSnapshot {
    let closes = series.closes();
    let volumes = series.volumes();
    let latest = series.latest();

    let mut snapshot =
        IndicatorSnapshot::new(series.symbol().to_string(), latest.close, latest.timestamp);

    snapshot.rsi = calculate_rsi(&closes, DEFAULT_RSI_PERIOD).ok();
    snapshot.sma = calculate_sma(&closes, SNAPSHOT_SMA_PERIOD).ok();
    snapshot.emas = calculate_emas(&closes, &SNAPSHOT_EMA_PERIODS);
    snapshot.bollinger = calculate_bollinger_bands(&closes, 20, 2.0).ok();
    snapshot.macd = calculate_macd_with(&closes, macd).ok();
    snapshot.volume = calculate_volume_ratio(&volumes, DEFAULT_VOLUME_MA_PERIOD).ok();

    snapshot
}

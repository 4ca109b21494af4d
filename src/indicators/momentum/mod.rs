//! Momentum indicators: RSI, MACD, price momentum

pub mod macd;
pub mod rsi;

pub use macd::*;
pub use rsi::*;

use crate::indicators::error::{check_window, IndicatorError};

/// Fractional price change from `lookback` candles back (inclusive of the
/// latest) to the latest close: (p[n-1] - p[n-lookback]) / p[n-lookback]
pub fn price_momentum(closes: &[f64], lookback: u32) -> Result<f64, IndicatorError> {
    check_window("momentum", lookback, lookback as usize, closes.len())?;
    let latest = closes[closes.len() - 1];
    let base = closes[closes.len() - lookback as usize];
    if base == 0.0 {
        return Err(IndicatorError::InvalidParameters(
            "momentum base price is zero".to_string(),
        ));
    }
    Ok((latest - base) / base)
}

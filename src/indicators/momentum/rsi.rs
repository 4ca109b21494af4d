//! RSI (Relative Strength Index) indicator

use crate::indicators::error::{check_window, IndicatorError};
use crate::models::indicators::RsiIndicator;

pub const DEFAULT_RSI_PERIOD: u32 = 14;

/// Calculate RSI over the trailing `period` price changes
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Only the last `period` deltas enter the averages. An average loss of
/// exactly zero yields 100; there is no matching special case for a zero
/// average gain (that simply computes to 0).
pub fn calculate_rsi(closes: &[f64], period: u32) -> Result<RsiIndicator, IndicatorError> {
    check_window("rsi", period, period as usize + 1, closes.len())?;

    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();
    let window = &deltas[deltas.len() - period as usize..];

    let (gains, losses) = window.iter().fold((0.0_f64, 0.0_f64), |(g, l), &d| {
        if d > 0.0 {
            (g + d, l)
        } else {
            (g, l - d)
        }
    });
    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return Ok(RsiIndicator {
            value: 100.0,
            period,
        });
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));

    Ok(RsiIndicator {
        value: rsi.clamp(0.0, 100.0),
        period,
    })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(closes: &[f64]) -> Result<RsiIndicator, IndicatorError> {
    calculate_rsi(closes, DEFAULT_RSI_PERIOD)
}

//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::indicators::error::{check_window, IndicatorError};
use crate::models::indicators::MacdIndicator;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SIGNAL_RATIO: f64 = 0.9;

/// How the MACD signal line is derived from the MACD line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalLineMethod {
    /// signal = macd * ratio; the strategies' thresholds are calibrated on 0.9
    FixedRatio(f64),
    /// signal = EMA(signal_period) of the MACD line series
    Ema,
}

impl Default for SignalLineMethod {
    fn default() -> Self {
        SignalLineMethod::FixedRatio(DEFAULT_SIGNAL_RATIO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdParams {
    pub fast_period: u32,
    pub slow_period: u32,
    pub signal_period: u32,
    pub signal_line: SignalLineMethod,
}

impl Default for MacdParams {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
            signal_line: SignalLineMethod::default(),
        }
    }
}

/// Calculate MACD with the default fixed-ratio signal line
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = MACD * 0.9
/// Histogram = MACD - Signal
pub fn calculate_macd(
    closes: &[f64],
    fast_period: u32,
    slow_period: u32,
    signal_period: u32,
) -> Result<MacdIndicator, IndicatorError> {
    calculate_macd_with(
        closes,
        &MacdParams {
            fast_period,
            slow_period,
            signal_period,
            signal_line: SignalLineMethod::default(),
        },
    )
}

/// Calculate MACD with an explicit signal-line method
pub fn calculate_macd_with(
    closes: &[f64],
    params: &MacdParams,
) -> Result<MacdIndicator, IndicatorError> {
    check_window("macd", params.fast_period, params.fast_period as usize, closes.len())?;
    check_window("macd", params.slow_period, params.slow_period as usize, closes.len())?;
    if params.signal_period == 0 {
        return Err(IndicatorError::InvalidPeriod {
            indicator: "macd",
            period: params.signal_period,
        });
    }
    if params.fast_period >= params.slow_period {
        return Err(IndicatorError::InvalidParameters(format!(
            "macd fast period {} must be shorter than slow period {}",
            params.fast_period, params.slow_period
        )));
    }

    let fast = math::ema_series(closes, params.fast_period as usize)
        .ok_or_else(|| IndicatorError::insufficient("macd", params.fast_period as usize, closes.len()))?;
    let slow = math::ema_series(closes, params.slow_period as usize)
        .ok_or_else(|| IndicatorError::insufficient("macd", params.slow_period as usize, closes.len()))?;

    let macd_line = fast[fast.len() - 1] - slow[slow.len() - 1];

    let signal_line = match params.signal_line {
        SignalLineMethod::FixedRatio(ratio) => macd_line * ratio,
        SignalLineMethod::Ema => {
            let macd_values: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
            math::ema(&macd_values, params.signal_period as usize).ok_or_else(|| {
                IndicatorError::insufficient("macd", params.signal_period as usize, macd_values.len())
            })?
        }
    };

    Ok(MacdIndicator {
        macd: macd_line,
        signal: signal_line,
        histogram: macd_line - signal_line,
        period: (params.fast_period, params.slow_period, params.signal_period),
    })
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(closes: &[f64]) -> Result<MacdIndicator, IndicatorError> {
    calculate_macd_with(closes, &MacdParams::default())
}

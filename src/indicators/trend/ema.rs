//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::indicators::error::{check_window, IndicatorError};
use crate::models::indicators::EmaIndicator;
use serde::{Deserialize, Serialize};

/// Calculate EMA for a specific period
///
/// Seeded with the first supplied close, so the value depends on how much
/// history is passed in. The series must be at least `period` long.
pub fn calculate_ema(closes: &[f64], period: u32) -> Result<EmaIndicator, IndicatorError> {
    check_window("ema", period, period as usize, closes.len())?;
    let value = math::ema(closes, period as usize)
        .ok_or_else(|| IndicatorError::insufficient("ema", period as usize, closes.len()))?;

    Ok(EmaIndicator { value, period })
}

/// Calculate multiple EMAs at once, skipping periods longer than the series
pub fn calculate_emas(closes: &[f64], periods: &[u32]) -> Vec<EmaIndicator> {
    periods
        .iter()
        .filter_map(|&period| calculate_ema(closes, period).ok())
        .collect()
}

/// Ordering of a fast/medium/slow EMA stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmaAlignment {
    /// fast > medium > slow
    Bullish,
    /// fast < medium < slow
    Bearish,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmaStack {
    pub fast: EmaIndicator,
    pub medium: EmaIndicator,
    pub slow: EmaIndicator,
}

impl EmaStack {
    pub fn alignment(&self) -> EmaAlignment {
        let (f, m, s) = (self.fast.value, self.medium.value, self.slow.value);
        if f > m && m > s {
            EmaAlignment::Bullish
        } else if f < m && m < s {
            EmaAlignment::Bearish
        } else {
            EmaAlignment::Mixed
        }
    }
}

/// Calculate three EMAs over the same closes
pub fn calculate_ema_stack(
    closes: &[f64],
    fast: u32,
    medium: u32,
    slow: u32,
) -> Result<EmaStack, IndicatorError> {
    Ok(EmaStack {
        fast: calculate_ema(closes, fast)?,
        medium: calculate_ema(closes, medium)?,
        slow: calculate_ema(closes, slow)?,
    })
}

//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::indicators::error::{check_window, IndicatorError};
use crate::models::indicators::SmaIndicator;

/// Mean of the trailing `period` samples
pub fn calculate_sma(values: &[f64], period: u32) -> Result<SmaIndicator, IndicatorError> {
    check_window("sma", period, period as usize, values.len())?;
    let value = math::sma(values, period as usize)
        .ok_or_else(|| IndicatorError::insufficient("sma", period as usize, values.len()))?;

    Ok(SmaIndicator { value, period })
}

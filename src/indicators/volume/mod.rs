//! Volume indicators

use crate::common::math;
use crate::indicators::error::{check_window, IndicatorError};
use crate::models::indicators::VolumeIndicator;

pub const DEFAULT_VOLUME_MA_PERIOD: u32 = 20;

/// Latest volume relative to its trailing average.
///
/// A zero average yields a ratio of 1.0 rather than a division by zero.
pub fn calculate_volume_ratio(volumes: &[f64], period: u32) -> Result<VolumeIndicator, IndicatorError> {
    check_window("volume_ratio", period, period as usize, volumes.len())?;
    let volume_ma = math::sma(volumes, period as usize)
        .ok_or_else(|| IndicatorError::insufficient("volume_ratio", period as usize, volumes.len()))?;
    let volume = volumes[volumes.len() - 1];
    let ratio = if volume_ma > 0.0 { volume / volume_ma } else { 1.0 };

    Ok(VolumeIndicator {
        volume,
        volume_ma,
        volume_ma_period: period,
        ratio,
    })
}

pub fn calculate_volume_ratio_default(volumes: &[f64]) -> Result<VolumeIndicator, IndicatorError> {
    calculate_volume_ratio(volumes, DEFAULT_VOLUME_MA_PERIOD)
}

//! Bollinger Bands indicator

use crate::common::math;
use crate::indicators::error::{check_window, IndicatorError};
use crate::models::indicators::BollingerBandsIndicator;

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (std_dev * population standard deviation)
/// Lower Band = Middle - (std_dev * population standard deviation)
pub fn calculate_bollinger_bands(
    closes: &[f64],
    period: u32,
    std_dev: f64,
) -> Result<BollingerBandsIndicator, IndicatorError> {
    check_window("bollinger", period, period as usize, closes.len())?;
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(IndicatorError::InvalidParameters(format!(
            "bollinger std_dev multiplier must be a non-negative number, got {}",
            std_dev
        )));
    }

    let window = math::tail(closes, period as usize)
        .ok_or_else(|| IndicatorError::insufficient("bollinger", period as usize, closes.len()))?;

    // Constant window: exact zero width, independent of summation rounding
    let (middle, std) = if window.iter().all(|&c| c == window[0]) {
        (window[0], 0.0)
    } else {
        let middle = math::mean(window)
            .ok_or_else(|| IndicatorError::insufficient("bollinger", period as usize, closes.len()))?;
        let std = math::standard_deviation(window, window.len())
            .ok_or_else(|| IndicatorError::insufficient("bollinger", period as usize, closes.len()))?;
        (middle, std)
    };

    let upper = middle + (std_dev * std);
    let lower = middle - (std_dev * std);

    Ok(BollingerBandsIndicator {
        upper,
        middle,
        lower,
        period,
        std_dev,
    })
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(
    closes: &[f64],
) -> Result<BollingerBandsIndicator, IndicatorError> {
    calculate_bollinger_bands(closes, 20, 2.0)
}

//! Window arithmetic over plain `f64` slices.
//!
//! Every helper returns `None` when the slice cannot satisfy the requested
//! window; callers in `indicators` turn that into an `IndicatorError`.

/// Arithmetic mean of the whole slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Trailing window of `period` samples
pub fn tail(values: &[f64], period: usize) -> Option<&[f64]> {
    if period == 0 || values.len() < period {
        return None;
    }
    Some(&values[values.len() - period..])
}

/// Simple moving average of the last `period` samples
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    mean(tail(values, period)?)
}

/// Smoothing factor 2 / (period + 1)
pub fn ema_multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Single EMA step
pub fn ema_from_previous(value: f64, previous: f64, period: usize) -> f64 {
    (value - previous) * ema_multiplier(period) + previous
}

/// EMA seeded with the first sample and rolled forward over the rest.
///
/// The result depends on how much history is supplied.
pub fn ema(values: &[f64], period: usize) -> Option<f64> {
    ema_series(values, period)?.last().copied()
}

/// Every intermediate EMA value, same length as `values`
pub fn ema_series(values: &[f64], period: usize) -> Option<Vec<f64>> {
    if period == 0 || values.is_empty() {
        return None;
    }
    let mut series = Vec::with_capacity(values.len());
    let mut current = values[0];
    series.push(current);
    for &value in &values[1..] {
        current = ema_from_previous(value, current, period);
        series.push(current);
    }
    Some(series)
}

/// Population standard deviation of the last `period` samples
pub fn standard_deviation(values: &[f64], period: usize) -> Option<f64> {
    let window = tail(values, period)?;
    let avg = mean(window)?;
    let variance = window.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / window.len() as f64;
    Some(variance.sqrt())
}

/// Percentage change from `from` to `to`
pub fn percent_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 {
        return None;
    }
    Some((to - from) / from * 100.0)
}

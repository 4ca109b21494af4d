use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RsiIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmaIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmaIndicator {
    pub value: f64,
    pub period: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBandsIndicator {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    pub period: u32,
    pub std_dev: f64,
}

impl BollingerBandsIndicator {
    /// Distance between the outer bands
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Position of `price` inside the bands, 0 at the lower band and 100 at
    /// the upper band. `None` when the bands have collapsed.
    pub fn position_pct(&self, price: f64) -> Option<f64> {
        let width = self.width();
        if width <= 0.0 {
            return None;
        }
        Some((price - self.lower) / width * 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdIndicator {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
    pub period: (u32, u32, u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeIndicator {
    pub volume: f64,
    pub volume_ma: f64,
    pub volume_ma_period: u32,
    pub ratio: f64,
}

/// Indicator values for the latest candle of a series.
///
/// A field is `None` when the series is shorter than that indicator's window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub symbol: String,
    pub price: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rsi: Option<RsiIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sma: Option<SmaIndicator>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub emas: Vec<EmaIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BollingerBandsIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macd: Option<MacdIndicator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<VolumeIndicator>,
}

impl IndicatorSnapshot {
    pub fn new(symbol: String, price: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            symbol,
            price,
            timestamp,
            rsi: None,
            sma: None,
            emas: Vec::new(),
            bollinger: None,
            macd: None,
            volume: None,
        }
    }

    /// EMA value for `period`, if it was computed
    pub fn ema(&self, period: u32) -> Option<f64> {
        self.emas
            .iter()
            .find(|ema| ema.period == period)
            .map(|ema| ema.value)
    }
}

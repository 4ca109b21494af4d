//! Validated, immutable candle series for one instrument

use crate::models::indicators::Candle;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Why a candle series was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Empty,
    NonFinite { index: usize, field: &'static str },
    NonPositive { index: usize, field: &'static str },
    NonMonotonicTimestamp { index: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "price series contains no candles"),
            ValidationError::NonFinite { index, field } => {
                write!(f, "candle {} has a non-finite {}", index, field)
            }
            ValidationError::NonPositive { index, field } => {
                write!(f, "candle {} has a non-positive {}", index, field)
            }
            ValidationError::NonMonotonicTimestamp { index } => write!(
                f,
                "candle {} does not come strictly after the previous candle",
                index
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Chronological candles for one instrument and timeframe
#[derive(Debug, Clone, Serialize)]
pub struct PriceSeries {
    symbol: String,
    candles: Vec<Candle>,
}

impl PriceSeries {
    /// Validate and wrap `candles`.
    ///
    /// Rejects an empty list, non-finite or non-positive price/volume fields
    /// and timestamps that do not strictly increase.
    pub fn new(symbol: impl Into<String>, candles: Vec<Candle>) -> Result<Self, ValidationError> {
        if candles.is_empty() {
            return Err(ValidationError::Empty);
        }

        let mut previous: Option<DateTime<Utc>> = None;
        for (index, candle) in candles.iter().enumerate() {
            for (field, value) in [
                ("open", candle.open),
                ("high", candle.high),
                ("low", candle.low),
                ("close", candle.close),
                ("volume", candle.volume),
            ] {
                if !value.is_finite() {
                    return Err(ValidationError::NonFinite { index, field });
                }
                if value <= 0.0 {
                    return Err(ValidationError::NonPositive { index, field });
                }
            }

            if let Some(prev) = previous {
                if candle.timestamp <= prev {
                    return Err(ValidationError::NonMonotonicTimestamp { index });
                }
            }
            previous = Some(candle.timestamp);
        }

        Ok(Self {
            symbol: symbol.into(),
            candles,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn latest(&self) -> &Candle {
        // Construction guarantees at least one candle.
        &self.candles[self.candles.len() - 1]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }
}

//! Multi-indicator confluence: counts agreeing factors across RSI, MACD,
//! EMA trend, volume and short-term price momentum.
//!
//! Volume never counts towards the bearish side.

use crate::indicators::momentum::{calculate_macd_with, calculate_rsi, price_momentum, MacdParams};
use crate::indicators::trend::calculate_ema;
use crate::indicators::volume::calculate_volume_ratio;
use crate::models::series::PriceSeries;
use crate::models::signal::{Signal, SignalDirection, SignalReason};
use crate::models::strategy::StrategyId;
use crate::strategies::evaluator::{emit, StrategyEvaluator};
use serde::{Deserialize, Serialize};

/// Number of factors the confluence score is taken over
pub const FACTOR_COUNT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfluenceParams {
    pub rsi_period: u32,
    pub bullish_rsi: f64,
    pub bearish_rsi: f64,
    pub macd: MacdParams,
    pub fast_ema: u32,
    pub slow_ema: u32,
    pub volume_period: u32,
    pub volume_threshold: f64,
    pub momentum_lookback: u32,
    pub required_factors: usize,
    pub min_candles: usize,
}

impl Default for ConfluenceParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            bullish_rsi: 40.0,
            bearish_rsi: 60.0,
            macd: MacdParams::default(),
            fast_ema: 9,
            slow_ema: 21,
            volume_period: 20,
            volume_threshold: 1.4,
            momentum_lookback: 5,
            required_factors: 4,
            min_candles: 50,
        }
    }
}

pub struct ConfluenceStrategy {
    params: ConfluenceParams,
}

impl ConfluenceStrategy {
    pub fn new(params: ConfluenceParams) -> Self {
        Self { params }
    }
}

impl Default for ConfluenceStrategy {
    fn default() -> Self {
        Self::new(ConfluenceParams::default())
    }
}

impl StrategyEvaluator for ConfluenceStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::Confluence
    }

    fn min_candles(&self) -> usize {
        let p = &self.params;
        p.min_candles
            .max(p.rsi_period as usize + 1)
            .max(p.macd.slow_period as usize)
            .max(p.slow_ema as usize)
            .max(p.volume_period as usize)
    }

    fn signal(&self, series: &PriceSeries) -> Option<Signal> {
        let p = &self.params;
        let closes = series.closes();

        let rsi = calculate_rsi(&closes, p.rsi_period).ok()?.value;
        let macd = calculate_macd_with(&closes, &p.macd).ok()?;
        let fast = calculate_ema(&closes, p.fast_ema).ok()?.value;
        let slow = calculate_ema(&closes, p.slow_ema).ok()?.value;
        let volume_ratio = calculate_volume_ratio(&series.volumes(), p.volume_period)
            .ok()?
            .ratio;
        let momentum = price_momentum(&closes, p.momentum_lookback).ok()?;

        let mut bullish: Vec<SignalReason> = Vec::with_capacity(FACTOR_COUNT);
        let mut bearish: Vec<SignalReason> = Vec::with_capacity(FACTOR_COUNT);
        let weight = 1.0 / FACTOR_COUNT as f64;

        if rsi < p.bullish_rsi {
            bullish.push(SignalReason::new(format!("RSI {:.2} below {}", rsi, p.bullish_rsi), weight));
        } else if rsi > p.bearish_rsi {
            bearish.push(SignalReason::new(format!("RSI {:.2} above {}", rsi, p.bearish_rsi), weight));
        }

        if macd.histogram > 0.0 {
            bullish.push(SignalReason::new(
                format!("MACD histogram positive ({:.8})", macd.histogram),
                weight,
            ));
        } else {
            bearish.push(SignalReason::new(
                format!("MACD histogram non-positive ({:.8})", macd.histogram),
                weight,
            ));
        }

        if fast > slow {
            bullish.push(SignalReason::new(
                format!("EMA{} above EMA{}", p.fast_ema, p.slow_ema),
                weight,
            ));
        } else {
            bearish.push(SignalReason::new(
                format!("EMA{} at or below EMA{}", p.fast_ema, p.slow_ema),
                weight,
            ));
        }

        if volume_ratio >= p.volume_threshold {
            bullish.push(SignalReason::new(
                format!("Volume {:.2}x its average", volume_ratio),
                weight,
            ));
        }

        if momentum > 0.0 {
            bullish.push(SignalReason::new(
                format!("{}-candle momentum {:+.2}%", p.momentum_lookback, momentum * 100.0),
                weight,
            ));
        } else {
            bearish.push(SignalReason::new(
                format!("{}-candle momentum {:+.2}%", p.momentum_lookback, momentum * 100.0),
                weight,
            ));
        }

        // Bullish takes precedence if a low requirement lets both sides qualify.
        let (direction, reasons) = if bullish.len() >= p.required_factors {
            (SignalDirection::Buy, bullish)
        } else if bearish.len() >= p.required_factors {
            (SignalDirection::Sell, bearish)
        } else {
            return None;
        };

        let strength = reasons.len() as f64 / FACTOR_COUNT as f64;
        Some(emit(series, self.id(), direction, strength, reasons))
    }
}

//! MACD momentum breakout strategy

use crate::indicators::momentum::{calculate_macd_with, MacdParams};
use crate::indicators::volume::calculate_volume_ratio;
use crate::models::series::PriceSeries;
use crate::models::signal::{Signal, SignalDirection, SignalReason};
use crate::models::strategy::StrategyId;
use crate::strategies::evaluator::{emit, StrategyEvaluator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacdMomentumParams {
    pub macd: MacdParams,
    pub volume_period: u32,
    pub volume_threshold: f64,
    pub base_strength: f64,
    pub histogram_weight: f64,
}

impl Default for MacdMomentumParams {
    fn default() -> Self {
        Self {
            macd: MacdParams::default(),
            volume_period: 20,
            volume_threshold: 1.3,
            base_strength: 0.8,
            histogram_weight: 1000.0,
        }
    }
}

pub struct MacdMomentumStrategy {
    params: MacdMomentumParams,
}

impl MacdMomentumStrategy {
    pub fn new(params: MacdMomentumParams) -> Self {
        Self { params }
    }
}

impl Default for MacdMomentumStrategy {
    fn default() -> Self {
        Self::new(MacdMomentumParams::default())
    }
}

impl StrategyEvaluator for MacdMomentumStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::MacdMomentum
    }

    fn min_candles(&self) -> usize {
        (self.params.macd.slow_period as usize).max(self.params.volume_period as usize)
    }

    fn signal(&self, series: &PriceSeries) -> Option<Signal> {
        let p = &self.params;
        let macd = calculate_macd_with(&series.closes(), &p.macd).ok()?;
        let volume_ratio = calculate_volume_ratio(&series.volumes(), p.volume_period)
            .ok()?
            .ratio;

        if volume_ratio < p.volume_threshold {
            return None;
        }

        let direction = if macd.macd > macd.signal && macd.histogram > 0.0 {
            SignalDirection::Buy
        } else if macd.macd < macd.signal && macd.histogram < 0.0 {
            SignalDirection::Sell
        } else {
            return None;
        };

        let histogram_component = macd.histogram.abs() * p.histogram_weight;
        let volume_component = (volume_ratio - p.volume_threshold) * 0.1;
        let label = match direction {
            SignalDirection::Buy => "Bullish",
            SignalDirection::Sell => "Bearish",
        };

        let reasons = vec![
            SignalReason::new(format!("{} MACD crossover with volume", label), p.base_strength),
            SignalReason::new(
                format!(
                    "MACD {:.8} vs signal {:.8}, histogram {:.8}",
                    macd.macd, macd.signal, macd.histogram
                ),
                histogram_component,
            ),
            SignalReason::new(
                format!("Volume {:.2}x its {}-candle average", volume_ratio, p.volume_period),
                volume_component,
            ),
        ];

        Some(emit(
            series,
            self.id(),
            direction,
            p.base_strength + histogram_component + volume_component,
            reasons,
        ))
    }
}

//! RSI + volume surge mean-reversion strategy

use crate::indicators::momentum::calculate_rsi;
use crate::indicators::volume::calculate_volume_ratio;
use crate::models::series::PriceSeries;
use crate::models::signal::{Signal, SignalDirection, SignalReason};
use crate::models::strategy::StrategyId;
use crate::strategies::evaluator::{emit, StrategyEvaluator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsiVolumeParams {
    pub rsi_period: u32,
    pub oversold: f64,
    pub overbought: f64,
    pub volume_period: u32,
    pub volume_threshold: f64,
    pub base_strength: f64,
    pub min_candles: usize,
}

impl Default for RsiVolumeParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            oversold: 30.0,
            overbought: 70.0,
            volume_period: 20,
            volume_threshold: 1.5,
            base_strength: 0.7,
            min_candles: 20,
        }
    }
}

/// BUY on an oversold RSI with a volume surge, SELL on an overbought one
pub struct RsiVolumeStrategy {
    params: RsiVolumeParams,
}

impl RsiVolumeStrategy {
    pub fn new(params: RsiVolumeParams) -> Self {
        Self { params }
    }
}

impl Default for RsiVolumeStrategy {
    fn default() -> Self {
        Self::new(RsiVolumeParams::default())
    }
}

impl StrategyEvaluator for RsiVolumeStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::RsiVolume
    }

    fn min_candles(&self) -> usize {
        self.params
            .min_candles
            .max(self.params.rsi_period as usize + 1)
            .max(self.params.volume_period as usize)
    }

    fn signal(&self, series: &PriceSeries) -> Option<Signal> {
        let p = &self.params;
        let rsi = calculate_rsi(&series.closes(), p.rsi_period).ok()?.value;
        let volume_ratio = calculate_volume_ratio(&series.volumes(), p.volume_period)
            .ok()?
            .ratio;

        if volume_ratio < p.volume_threshold {
            return None;
        }

        let (direction, rsi_component, label) = if rsi <= p.oversold {
            (SignalDirection::Buy, (p.oversold - rsi) / 100.0, "oversold")
        } else if rsi >= p.overbought {
            (SignalDirection::Sell, (rsi - p.overbought) / 100.0, "overbought")
        } else {
            return None;
        };
        let volume_component = (volume_ratio - 1.0) * 0.1;

        let reasons = vec![
            SignalReason::new(
                format!("RSI {} with volume confirmation", label),
                p.base_strength,
            ),
            SignalReason::new(format!("RSI({}) at {:.2}", p.rsi_period, rsi), rsi_component),
            SignalReason::new(
                format!("Volume {:.2}x its {}-candle average", volume_ratio, p.volume_period),
                volume_component,
            ),
        ];

        Some(emit(
            series,
            self.id(),
            direction,
            p.base_strength + rsi_component + volume_component,
            reasons,
        ))
    }
}

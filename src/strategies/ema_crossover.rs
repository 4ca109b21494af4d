//! Triple EMA (9/21/50) trend strategy with volume confirmation

use crate::common::math;
use crate::indicators::trend::{calculate_ema_stack, EmaAlignment};
use crate::indicators::volume::calculate_volume_ratio;
use crate::models::series::PriceSeries;
use crate::models::signal::{Signal, SignalDirection, SignalReason};
use crate::models::strategy::StrategyId;
use crate::strategies::evaluator::{emit, StrategyEvaluator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmaCrossoverParams {
    pub fast_period: u32,
    pub medium_period: u32,
    pub slow_period: u32,
    pub volume_period: u32,
    /// 1.3 by default; the stricter variant uses 1.5
    pub volume_threshold: f64,
    pub base_strength: f64,
    pub separation_weight: f64,
    /// Also require the close beyond the fast EMA
    pub require_price_confirmation: bool,
}

impl Default for EmaCrossoverParams {
    fn default() -> Self {
        Self {
            fast_period: 9,
            medium_period: 21,
            slow_period: 50,
            volume_period: 20,
            volume_threshold: 1.3,
            base_strength: 0.75,
            separation_weight: 0.1,
            require_price_confirmation: false,
        }
    }
}

pub struct EmaCrossoverStrategy {
    params: EmaCrossoverParams,
}

impl EmaCrossoverStrategy {
    pub fn new(params: EmaCrossoverParams) -> Self {
        Self { params }
    }
}

impl Default for EmaCrossoverStrategy {
    fn default() -> Self {
        Self::new(EmaCrossoverParams::default())
    }
}

impl StrategyEvaluator for EmaCrossoverStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::EmaCrossover
    }

    fn min_candles(&self) -> usize {
        (self.params.slow_period as usize).max(self.params.volume_period as usize)
    }

    fn signal(&self, series: &PriceSeries) -> Option<Signal> {
        let p = &self.params;
        let stack = calculate_ema_stack(
            &series.closes(),
            p.fast_period,
            p.medium_period,
            p.slow_period,
        )
        .ok()?;
        let volume_ratio = calculate_volume_ratio(&series.volumes(), p.volume_period)
            .ok()?
            .ratio;

        if volume_ratio < p.volume_threshold {
            return None;
        }

        let price = series.latest().close;
        let (fast, slow) = (stack.fast.value, stack.slow.value);
        let direction = match stack.alignment() {
            EmaAlignment::Bullish if !p.require_price_confirmation || price > fast => {
                SignalDirection::Buy
            }
            EmaAlignment::Bearish if !p.require_price_confirmation || price < fast => {
                SignalDirection::Sell
            }
            _ => return None,
        };

        let spread = math::percent_change(slow, fast)?;
        let separation = match direction {
            SignalDirection::Buy => spread,
            SignalDirection::Sell => -spread,
        };
        let separation_component = separation * p.separation_weight;
        let volume_component = (volume_ratio - p.volume_threshold) * 0.1;
        let label = match direction {
            SignalDirection::Buy => "Bullish",
            SignalDirection::Sell => "Bearish",
        };

        let reasons = vec![
            SignalReason::new(
                format!(
                    "{} EMA alignment {:.6} / {:.6} / {:.6}",
                    label, fast, stack.medium.value, slow
                ),
                p.base_strength,
            ),
            SignalReason::new(
                format!(
                    "EMA{} / EMA{} separation {:.2}%",
                    p.fast_period, p.slow_period, separation
                ),
                separation_component,
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
            p.base_strength + separation_component + volume_component,
            reasons,
        ))
    }
}

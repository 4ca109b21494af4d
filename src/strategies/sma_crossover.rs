//! Price vs SMA(20) vs SMA(50) alignment

use crate::indicators::trend::calculate_sma;
use crate::models::series::PriceSeries;
use crate::models::signal::{Signal, SignalDirection, SignalReason};
use crate::models::strategy::StrategyId;
use crate::strategies::evaluator::{emit, StrategyEvaluator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmaCrossoverParams {
    pub fast_period: u32,
    pub slow_period: u32,
    pub strength: f64,
}

impl Default for SmaCrossoverParams {
    fn default() -> Self {
        Self {
            fast_period: 20,
            slow_period: 50,
            strength: 0.8,
        }
    }
}

pub struct SmaCrossoverStrategy {
    params: SmaCrossoverParams,
}

impl SmaCrossoverStrategy {
    pub fn new(params: SmaCrossoverParams) -> Self {
        Self { params }
    }
}

impl Default for SmaCrossoverStrategy {
    fn default() -> Self {
        Self::new(SmaCrossoverParams::default())
    }
}

impl StrategyEvaluator for SmaCrossoverStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::SmaCrossover
    }

    fn min_candles(&self) -> usize {
        self.params.slow_period.max(self.params.fast_period) as usize
    }

    fn signal(&self, series: &PriceSeries) -> Option<Signal> {
        let p = &self.params;
        let closes = series.closes();
        let fast = calculate_sma(&closes, p.fast_period).ok()?.value;
        let slow = calculate_sma(&closes, p.slow_period).ok()?.value;
        let price = series.latest().close;

        let (direction, description) = if price > fast && fast > slow {
            (SignalDirection::Buy, "Price above both moving averages")
        } else if price < fast && fast < slow {
            (SignalDirection::Sell, "Price below both moving averages")
        } else {
            return None;
        };

        let reasons = vec![SignalReason::new(
            format!(
                "{}: SMA{} {:.6}, SMA{} {:.6}",
                description, p.fast_period, fast, p.slow_period, slow
            ),
            p.strength,
        )];

        Some(emit(series, self.id(), direction, p.strength, reasons))
    }
}

//! Bollinger Bands mean-reversion strategy

use crate::common::math;
use crate::indicators::momentum::calculate_rsi;
use crate::indicators::volatility::calculate_bollinger_bands;
use crate::models::series::PriceSeries;
use crate::models::signal::{Signal, SignalDirection, SignalReason};
use crate::models::strategy::StrategyId;
use crate::strategies::evaluator::{emit, StrategyEvaluator};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BollingerParams {
    pub period: u32,
    pub std_dev: f64,
    pub rsi_period: u32,
    /// BUY requires RSI strictly below this
    pub buy_rsi: f64,
    /// SELL requires RSI strictly above this
    pub sell_rsi: f64,
    pub base_strength: f64,
    pub distance_weight: f64,
}

impl Default for BollingerParams {
    fn default() -> Self {
        Self {
            period: 20,
            std_dev: 2.0,
            rsi_period: 14,
            buy_rsi: 35.0,
            sell_rsi: 65.0,
            base_strength: 0.75,
            distance_weight: 0.05,
        }
    }
}

/// BUY at or below the lower band, SELL at or above the upper band, each
/// confirmed by RSI
pub struct BollingerReversionStrategy {
    params: BollingerParams,
}

impl BollingerReversionStrategy {
    pub fn new(params: BollingerParams) -> Self {
        Self { params }
    }
}

impl Default for BollingerReversionStrategy {
    fn default() -> Self {
        Self::new(BollingerParams::default())
    }
}

impl StrategyEvaluator for BollingerReversionStrategy {
    fn id(&self) -> StrategyId {
        StrategyId::BollingerReversion
    }

    fn min_candles(&self) -> usize {
        (self.params.period as usize).max(self.params.rsi_period as usize + 1)
    }

    fn signal(&self, series: &PriceSeries) -> Option<Signal> {
        let p = &self.params;
        let closes = series.closes();
        let bands = calculate_bollinger_bands(&closes, p.period, p.std_dev).ok()?;

        // Collapsed bands carry no reversion information.
        if bands.width() <= 0.0 {
            debug!(
                symbol = %series.symbol(),
                middle = bands.middle,
                "Bollinger bands have zero width, abstaining"
            );
            return None;
        }

        let rsi = calculate_rsi(&closes, p.rsi_period).ok()?.value;
        let price = series.latest().close;

        let (direction, distance, rsi_component, band) = if price <= bands.lower && rsi < p.buy_rsi {
            (
                SignalDirection::Buy,
                math::percent_change(price, bands.lower)?,
                (p.buy_rsi - rsi) / 100.0,
                "lower",
            )
        } else if price >= bands.upper && rsi > p.sell_rsi {
            (
                SignalDirection::Sell,
                -math::percent_change(price, bands.upper)?,
                (rsi - p.sell_rsi) / 100.0,
                "upper",
            )
        } else {
            return None;
        };
        let distance_component = distance * p.distance_weight;

        let reasons = vec![
            SignalReason::new(
                format!("Price at {} band with RSI confirmation", band),
                p.base_strength,
            ),
            SignalReason::new(
                format!("{:.2}% beyond the {} band", distance, band),
                distance_component,
            ),
            SignalReason::new(format!("RSI({}) at {:.2}", p.rsi_period, rsi), rsi_component),
        ];

        Some(emit(
            series,
            self.id(),
            direction,
            p.base_strength + distance_component + rsi_component,
            reasons,
        ))
    }
}

//! Common capability implemented by every strategy

use crate::models::series::PriceSeries;
use crate::models::signal::{Signal, SignalDirection, SignalReason};
use crate::models::strategy::StrategyId;

/// Turns a price series into at most one directional signal.
///
/// Implementors only write `signal`; `evaluate` enforces the minimum history
/// so an evaluator never emits a direction on a series that is too short.
pub trait StrategyEvaluator: Send + Sync {
    fn id(&self) -> StrategyId;

    /// Shortest series the strategy will evaluate
    fn min_candles(&self) -> usize;

    /// Signal for a series already known to satisfy `min_candles`
    fn signal(&self, series: &PriceSeries) -> Option<Signal>;

    /// `None` means the strategy has no opinion this cycle
    fn evaluate(&self, series: &PriceSeries) -> Option<Signal> {
        if series.len() < self.min_candles() {
            return None;
        }
        self.signal(series)
    }
}

/// Build a signal stamped with the series' latest candle
pub(crate) fn emit(
    series: &PriceSeries,
    strategy: StrategyId,
    direction: SignalDirection,
    strength: f64,
    reasons: Vec<SignalReason>,
) -> Signal {
    let latest = series.latest();
    Signal::new(
        strategy,
        direction,
        strength,
        reasons,
        latest.close,
        latest.timestamp,
    )
}

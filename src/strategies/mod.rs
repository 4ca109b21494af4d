//! Strategy evaluators that turn a price series into directional signals.

pub mod bollinger;
pub mod confluence;
pub mod ema_crossover;
pub mod evaluator;
pub mod macd_momentum;
pub mod rsi_volume;
pub mod sma_crossover;

pub use bollinger::{BollingerParams, BollingerReversionStrategy};
pub use confluence::{ConfluenceParams, ConfluenceStrategy};
pub use ema_crossover::{EmaCrossoverParams, EmaCrossoverStrategy};
pub use evaluator::StrategyEvaluator;
pub use macd_momentum::{MacdMomentumParams, MacdMomentumStrategy};
pub use rsi_volume::{RsiVolumeParams, RsiVolumeStrategy};
pub use sma_crossover::{SmaCrossoverParams, SmaCrossoverStrategy};

use crate::indicators::momentum::SignalLineMethod;
use crate::models::strategy::StrategyId;
use serde::{Deserialize, Serialize};

/// Parameters for every strategy the engine can run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrategySettings {
    pub rsi_volume: RsiVolumeParams,
    pub bollinger: BollingerParams,
    pub macd_momentum: MacdMomentumParams,
    pub ema_crossover: EmaCrossoverParams,
    pub confluence: ConfluenceParams,
    pub sma_crossover: SmaCrossoverParams,
}

impl StrategySettings {
    /// Use the same MACD signal-line derivation in every MACD consumer
    pub fn with_signal_line(mut self, method: SignalLineMethod) -> Self {
        self.macd_momentum.macd.signal_line = method;
        self.confluence.macd.signal_line = method;
        self
    }
}

pub fn build_strategy(id: StrategyId, settings: &StrategySettings) -> Box<dyn StrategyEvaluator> {
    match id {
        StrategyId::RsiVolume => Box::new(RsiVolumeStrategy::new(settings.rsi_volume.clone())),
        StrategyId::BollingerReversion => {
            Box::new(BollingerReversionStrategy::new(settings.bollinger.clone()))
        }
        StrategyId::MacdMomentum => {
            Box::new(MacdMomentumStrategy::new(settings.macd_momentum.clone()))
        }
        StrategyId::EmaCrossover => {
            Box::new(EmaCrossoverStrategy::new(settings.ema_crossover.clone()))
        }
        StrategyId::Confluence => Box::new(ConfluenceStrategy::new(settings.confluence.clone())),
        StrategyId::SmaCrossover => {
            Box::new(SmaCrossoverStrategy::new(settings.sma_crossover.clone()))
        }
    }
}

/// Build evaluators in the given order, skipping duplicates
pub fn build_strategies(
    ids: &[StrategyId],
    settings: &StrategySettings,
) -> Vec<Box<dyn StrategyEvaluator>> {
    let mut seen = Vec::with_capacity(ids.len());
    ids.iter()
        .filter(|id| {
            if seen.contains(*id) {
                false
            } else {
                seen.push(**id);
                true
            }
        })
        .map(|id| build_strategy(*id, settings))
        .collect()
}

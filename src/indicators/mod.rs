pub mod error;
pub mod snapshot;

pub mod momentum;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use error::IndicatorError;
pub use snapshot::compute_snapshot;

//! Logging initialization with environment-based formatters
//!
//! - Production: structured JSON lines
//! - Anything else: colored, human-readable output

use crate::config::get_environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";

pub fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

/// Initialize logging for the current environment (`APP_ENV`/`ENVIRONMENT`)
pub fn init_logging() {
    init_logging_for(&get_environment());
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging_for(environment: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = if is_production(environment) {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stdout),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "Global subscriber already installed");
    }
}

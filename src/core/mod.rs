//! Orchestration: per-symbol runtime and the cron scheduler

pub mod runtime;
pub mod scheduler;

pub use runtime::*;
pub use scheduler::*;

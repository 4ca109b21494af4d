//! Cron-based scheduler that runs an evaluation cycle on every tick

use crate::core::runtime::{ConsensusRuntime, SymbolOutcome};
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};

pub type SchedulerError = Box<dyn std::error::Error + Send + Sync>;

/// Convert an interval into a six-field cron expression
/// (second minute hour day month weekday).
///
/// Cron steps restart at every minute, hour or day boundary, so only
/// intervals that divide 60 seconds, 60 minutes or 24 hours evenly keep a
/// constant period. Anything else is rejected.
pub fn interval_to_cron(interval_seconds: u64) -> Result<String, SchedulerError> {
    if interval_seconds == 0 {
        return Err("Scheduler disabled: interval_seconds is 0".into());
    }
    let expr = match interval_seconds {
        s if s < 60 && 60 % s == 0 => format!("*/{} * * * * *", s),
        s if s < 3600 && s % 60 == 0 && 60 % (s / 60) == 0 => format!("0 */{} * * * *", s / 60),
        s if s <= 86_400 && s % 3600 == 0 && 24 % (s / 3600) == 0 => {
            format!("0 0 */{} * * *", s / 3600)
        }
        s => {
            return Err(format!(
                "Unsupported interval {}s: use a divisor of 60s, a whole-minute divisor of 60m or a whole-hour divisor of 24h",
                s
            )
            .into())
        }
    };
    Ok(expr)
}

/// Runs `ConsensusRuntime::evaluate_all` on a cron schedule
pub struct EvaluationScheduler {
    runtime: ConsensusRuntime,
    schedule: Schedule,
    sink: Option<mpsc::Sender<SymbolOutcome>>,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl EvaluationScheduler {
    pub fn new(runtime: ConsensusRuntime, interval_seconds: u64) -> Result<Self, SchedulerError> {
        let cron_expr = interval_to_cron(interval_seconds)?;
        let schedule = Schedule::from_str(&cron_expr)
            .map_err(|e| format!("Invalid cron expression '{}': {}", cron_expr, e))?;

        info!(
            interval = interval_seconds,
            cron = %cron_expr,
            symbols = ?runtime.symbols(),
            "EvaluationScheduler: created with interval {}s",
            interval_seconds
        );

        Ok(Self {
            runtime,
            schedule,
            sink: None,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Forward every outcome to a channel as well as logging it
    pub fn with_sink(mut self, sink: mpsc::Sender<SymbolOutcome>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub async fn start(&self) -> Result<(), SchedulerError> {
        let mut guard = self.handle.write().await;
        if guard.is_some() {
            return Err("Scheduler already running".into());
        }

        let runtime = self.runtime.clone();
        let schedule = self.schedule.clone();
        let sink = self.sink.clone();

        let handle = tokio::spawn(async move {
            info!("EvaluationScheduler: started, waiting for cron schedule...");
            loop {
                let next = schedule.upcoming(chrono::Utc).next();
                match next {
                    Some(next_tick) => {
                        let wait = (next_tick - chrono::Utc::now()).to_std().unwrap_or_default();
                        tokio::time::sleep(wait).await;
                    }
                    None => {
                        tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                        continue;
                    }
                }

                debug!(
                    symbol_count = runtime.symbols().len(),
                    timeframe = %runtime.timeframe(),
                    "EvaluationScheduler: cron tick"
                );

                for outcome in runtime.evaluate_all().await {
                    if let Some(sink) = &sink {
                        if sink.send(outcome).await.is_err() {
                            warn!("EvaluationScheduler: decision receiver dropped");
                        }
                    }
                }
            }
        });

        *guard = Some(handle);
        info!("EvaluationScheduler: started successfully");
        Ok(())
    }

    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("EvaluationScheduler: stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}

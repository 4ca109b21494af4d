//! Prometheus metrics for evaluation cycles

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub cycles_total: IntCounter,
    pub cycle_failures_total: IntCounter,
    pub cycles_active: IntGauge,
    pub cycle_duration_seconds: Histogram,
    pub signals_total: IntCounterVec,
    pub abstentions_total: IntCounterVec,
    pub decisions_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cycles_total = IntCounter::new(
            "quorum_cycles_total",
            "Completed per-instrument evaluation cycles",
        )?;
        let cycle_failures_total = IntCounter::new(
            "quorum_cycle_failures_total",
            "Evaluation cycles that failed on market data or validation",
        )?;
        let cycles_active = IntGauge::new(
            "quorum_cycles_active",
            "Evaluation cycles currently in progress",
        )?;
        let cycle_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "quorum_cycle_duration_seconds",
                "Time spent fetching and evaluating one instrument",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        )?;
        let signals_total = IntCounterVec::new(
            Opts::new("quorum_signals_total", "Signals emitted per strategy"),
            &["strategy", "direction"],
        )?;
        let abstentions_total = IntCounterVec::new(
            Opts::new("quorum_abstentions_total", "Cycles where a strategy had no opinion"),
            &["strategy"],
        )?;
        let decisions_total = IntCounterVec::new(
            Opts::new("quorum_decisions_total", "Consensus decisions by action"),
            &["action"],
        )?;

        registry.register(Box::new(cycles_total.clone()))?;
        registry.register(Box::new(cycle_failures_total.clone()))?;
        registry.register(Box::new(cycles_active.clone()))?;
        registry.register(Box::new(cycle_duration_seconds.clone()))?;
        registry.register(Box::new(signals_total.clone()))?;
        registry.register(Box::new(abstentions_total.clone()))?;
        registry.register(Box::new(decisions_total.clone()))?;

        Ok(Self {
            registry,
            cycles_total,
            cycle_failures_total,
            cycles_active,
            cycle_duration_seconds,
            signals_total,
            abstentions_total,
            decisions_total,
        })
    }

    /// Render every registered metric in the Prometheus text format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

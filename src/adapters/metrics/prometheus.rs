//! Prometheus Metrics Registry - Contest Engine Observability
//!
//! Registers and exposes Prometheus metrics for dashboards. Covers
//! contest activity counters, oracle provider health, and the reminder
//! sweep.

use prometheus::{
    Encoder, Gauge, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry,
    TextEncoder,
};

/// Centralized Prometheus metrics for the contest engine.
///
/// All metrics follow the naming convention `namethat_engine_*`.
pub struct EngineMetrics {
    /// Prometheus registry.
    registry: Registry,
    /// Total posts created.
    pub posts_created: IntCounter,
    /// Total suggestions accepted.
    pub suggestions_created: IntCounter,
    /// Total votes committed.
    pub votes_cast: IntCounter,
    /// Rejected writes, labelled by reason (duplicate_vote, conflict, ...).
    pub writes_rejected: IntCounterVec,
    /// Total winners selected.
    pub winners_selected: IntCounter,
    /// Total reminders emitted by sweeps.
    pub reminders_emitted: IntCounter,
    /// Oracle fetch outcomes, labelled by provider and outcome.
    pub oracle_fetches: IntCounterVec,
    /// Last known asset→USD rate.
    pub oracle_rate: Gauge,
    /// Request latency per route (seconds).
    pub request_latency: HistogramVec,
}

impl EngineMetrics {
    /// Create and register all Prometheus metrics.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let posts_created = IntCounter::with_opts(Opts::new(
            "namethat_engine_posts_created_total",
            "Total contest posts created",
        ))?;

        let suggestions_created = IntCounter::with_opts(Opts::new(
            "namethat_engine_suggestions_created_total",
            "Total suggestions accepted",
        ))?;

        let votes_cast = IntCounter::with_opts(Opts::new(
            "namethat_engine_votes_cast_total",
            "Total votes committed",
        ))?;

        let writes_rejected = IntCounterVec::new(
            Opts::new(
                "namethat_engine_writes_rejected_total",
                "Rejected write operations",
            ),
            &["reason"],
        )?;

        let winners_selected = IntCounter::with_opts(Opts::new(
            "namethat_engine_winners_selected_total",
            "Total winner decisions committed",
        ))?;

        let reminders_emitted = IntCounter::with_opts(Opts::new(
            "namethat_engine_reminders_emitted_total",
            "Total pick-winner reminders enqueued",
        ))?;

        let oracle_fetches = IntCounterVec::new(
            Opts::new(
                "namethat_engine_oracle_fetches_total",
                "Oracle fetch attempts",
            ),
            &["provider", "outcome"],
        )?;

        let oracle_rate = Gauge::new(
            "namethat_engine_oracle_rate_usd",
            "Last known asset to USD rate",
        )?;

        let request_latency = HistogramVec::new(
            HistogramOpts::new(
                "namethat_engine_request_latency_seconds",
                "API request latency in seconds",
            )
            .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["route"],
        )?;

        registry.register(Box::new(posts_created.clone()))?;
        registry.register(Box::new(suggestions_created.clone()))?;
        registry.register(Box::new(votes_cast.clone()))?;
        registry.register(Box::new(writes_rejected.clone()))?;
        registry.register(Box::new(winners_selected.clone()))?;
        registry.register(Box::new(reminders_emitted.clone()))?;
        registry.register(Box::new(oracle_fetches.clone()))?;
        registry.register(Box::new(oracle_rate.clone()))?;
        registry.register(Box::new(request_latency.clone()))?;

        Ok(Self {
            registry,
            posts_created,
            suggestions_created,
            votes_cast,
            writes_rejected,
            winners_selected,
            reminders_emitted,
            oracle_fetches,
            oracle_rate,
            request_latency,
        })
    }

    /// Render the registry in Prometheus text exposition format.
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_register_and_render() {
        let metrics = EngineMetrics::new().unwrap();
        metrics.posts_created.inc();
        metrics.votes_cast.inc();
        metrics
            .writes_rejected
            .with_label_values(&["duplicate_vote"])
            .inc();

        let rendered = metrics.render().unwrap();
        assert!(rendered.contains("namethat_engine_posts_created_total 1"));
        assert!(rendered.contains("namethat_engine_votes_cast_total 1"));
        assert!(rendered.contains("duplicate_vote"));
    }
}

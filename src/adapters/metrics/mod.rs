//! Metrics Adapters - Observability Endpoints
//!
//! Prometheus metrics registry plus the health/metrics HTTP server:
//! - `EngineMetrics`: counters/gauges/histograms for contest activity
//! - `HealthServer`: /live, /ready, /metrics on the metrics port

pub mod health;
pub mod prometheus;

pub use health::{HealthServer, HealthState};
pub use prometheus::EngineMetrics;

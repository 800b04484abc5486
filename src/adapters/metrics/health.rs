//! Health Check Server - Liveness, Readiness, and Metrics Endpoints
//!
//! Exposes /live, /ready, and /metrics via axum 0.7 for Docker health
//! checks and monitoring. Readiness flips to 503 during graceful
//! shutdown so load balancers drain before the process exits.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use tokio::sync::broadcast;
use tracing::info;

use super::prometheus::EngineMetrics;

/// Shared health state polled by readiness probes.
#[derive(Clone)]
pub struct HealthState {
    /// Whether the engine should accept traffic.
    ready: Arc<AtomicBool>,
    /// Metrics registry rendered at /metrics.
    metrics: Arc<EngineMetrics>,
}

impl HealthState {
    /// Create a new health state (ready by default).
    pub fn new(metrics: Arc<EngineMetrics>) -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(true)),
            metrics,
        }
    }

    /// Mark the service as draining; readiness probes start failing.
    pub fn set_draining(&self) {
        self.ready.store(false, Ordering::Relaxed);
    }
}

/// Axum-based health/metrics HTTP server.
pub struct HealthServer {
    state: HealthState,
    port: u16,
}

impl HealthServer {
    /// Create a new health server.
    pub fn new(state: HealthState, port: u16) -> Self {
        Self { state, port }
    }

    /// Serve until the shutdown signal fires.
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) -> anyhow::Result<()> {
        let app = Router::new()
            .route("/live", get(|| async { StatusCode::OK }))
            .route("/ready", get(Self::readiness))
            .route("/metrics", get(Self::metrics))
            .with_state(self.state);

        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!(address = %addr, "Health server started");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;
        Ok(())
    }

    async fn readiness(State(state): State<HealthState>) -> StatusCode {
        if state.ready.load(Ordering::Relaxed) {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }

    async fn metrics(State(state): State<HealthState>) -> impl IntoResponse {
        match state.metrics.render() {
            Ok(body) => (StatusCode::OK, body),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, String::new()),
        }
    }
}

//! Namethat Engine — Entry Point
//!
//! Initializes configuration, logging, the contest store, the price
//! oracle cache, and the HTTP servers. Runs until SIGINT/SIGTERM.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Build oracle providers (CoinGecko primary, Coinbase fallback) + cache
//! 4. Build the in-memory contest store and outbound queues
//! 5. Wire use cases (ContestService, WinnerResolver, ReminderScheduler)
//! 6. Spawn health/metrics server
//! 7. Spawn the contest API server
//! 8. Spawn the in-process reminder sweep loop
//! 9. Wait for SIGINT → graceful shutdown (drain→stop→exit)

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

mod adapters;
mod config;
mod domain;
mod ports;
mod usecases;

use adapters::api::{AppState, router};
use adapters::metrics::{EngineMetrics, HealthServer, HealthState};
use adapters::oracle::{CoinGeckoProvider, CoinbaseProvider, PriceOracleCache};
use adapters::persistence::InMemoryStore;
use adapters::queue::{InMemoryQueue, SettlementLog};
use ports::clock::SystemClock;
use ports::rate_provider::RateProvider;
use usecases::contest_service::ContestService;
use usecases::reminder_scheduler::ReminderScheduler;
use usecases::winner_resolver::WinnerResolver;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.service.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.service.name,
        version = env!("CARGO_PKG_VERSION"),
        api_port = config.service.api_port,
        metrics_port = config.service.metrics_port,
        "Starting namethat engine"
    );

    // ── 3. Shutdown signal channel ──────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);

    // ── 4. Metrics registry, oracle providers + TTL cache ──
    let metrics = Arc::new(EngineMetrics::new().context("Failed to register metrics")?);

    let provider_timeout = Duration::from_millis(config.oracle.timeout_ms);
    let coingecko = Arc::new(
        CoinGeckoProvider::new(provider_timeout)
            .context("Failed to create CoinGecko provider")?,
    );
    let coinbase = Arc::new(
        CoinbaseProvider::new(provider_timeout)
            .context("Failed to create Coinbase provider")?,
    );
    let providers: Vec<Arc<dyn RateProvider>> = vec![coingecko, coinbase];
    let oracle: Arc<dyn RateProvider> = Arc::new(
        PriceOracleCache::new(
            providers,
            Duration::from_secs(config.oracle.ttl_secs),
            Arc::new(SystemClock),
        )
        .with_metrics(Arc::clone(&metrics)),
    );

    // ── 5. Store, queues, use cases ─────────────────────────
    let store = Arc::new(InMemoryStore::new());
    let reminder_queue = Arc::new(InMemoryQueue::new());
    let settlement_sink = Arc::new(SettlementLog::new());

    let min_prize = Decimal::from_f64(config.contest.min_prize_usd)
        .context("min_prize_usd is not representable as a decimal")?;
    let suggestion_cap = match config.contest.max_suggestions_per_post {
        0 => None,
        cap => Some(cap),
    };

    let service = Arc::new(ContestService::new(
        Arc::clone(&store),
        oracle,
        min_prize,
        suggestion_cap,
    ));
    let resolver = Arc::new(WinnerResolver::new(
        Arc::clone(&store),
        settlement_sink,
    ));
    let scheduler = Arc::new(ReminderScheduler::new(
        Arc::clone(&store),
        reminder_queue,
        config.reminders.stale_after_hours,
    ));

    // ── 6. Spawn health/metrics server ──────────────────────
    let health_state = HealthState::new(Arc::clone(&metrics));
    let health_server = HealthServer::new(health_state.clone(), config.service.metrics_port);
    let health_shutdown = shutdown_tx.subscribe();
    let health_handle = tokio::spawn(async move {
        if let Err(e) = health_server.run(health_shutdown).await {
            error!(error = %e, "Health server failed");
        }
    });

    // ── 7. Spawn the contest API server ─────────────────────
    let app = router(AppState {
        service,
        resolver,
        scheduler: Arc::clone(&scheduler),
        metrics,
    });
    let api_addr = format!("0.0.0.0:{}", config.service.api_port);
    let listener = tokio::net::TcpListener::bind(&api_addr)
        .await
        .with_context(|| format!("Failed to bind API listener on {api_addr}"))?;
    info!(address = %api_addr, "Contest API listening");

    let mut api_shutdown = shutdown_tx.subscribe();
    let api_handle = tokio::spawn(async move {
        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = api_shutdown.recv().await;
            })
            .await;
        if let Err(e) = result {
            error!(error = %e, "API server failed");
        }
    });

    // ── 8. Spawn the in-process reminder sweep loop ─────────
    let sweep_interval = Duration::from_secs(config.reminders.sweep_interval_secs);
    let sweep_shutdown = shutdown_tx.subscribe();
    let sweep_handle = tokio::spawn(async move {
        scheduler.run(sweep_interval, sweep_shutdown).await;
    });

    info!("All tasks spawned — engine is running");

    // ── 9. Wait for SIGINT ──────────────────────────────────
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
        }
    }

    // Readiness probe flips to 503 so load balancers drain first.
    health_state.set_draining();

    // Signal all tasks to stop.
    let _ = shutdown_tx.send(());
    info!("Shutdown signal broadcast to all tasks");

    // Wait for servers and the sweep loop to wind down (bounded).
    let _ = tokio::time::timeout(Duration::from_secs(10), api_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;
    health_handle.abort();

    info!("Shutdown complete");
    Ok(())
}

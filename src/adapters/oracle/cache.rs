//! Price Oracle Cache - TTL'd Decorator Over a Provider Chain
//!
//! Gates contest creation on the asset→USD rate without hammering the
//! external providers. Behavior:
//!
//! 1. Serve the cached rate while it is younger than the TTL (60 s
//!    default) — no network call.
//! 2. On expiry, try providers in order (primary first). The first
//!    success updates the cached value and timestamp under one write
//!    guard, so readers never observe a torn (rate, timestamp) pair.
//! 3. If every provider fails but a stale value exists, serve the stale
//!    value — blocking contest creation is worse than a slightly old
//!    rate. The cache timestamp is NOT refreshed, so the next call
//!    retries the providers.
//! 4. If every provider fails and nothing is cached, the fetch errors
//!    and the use case surfaces `OracleUnavailable`.
//!
//! The clock is injected so tests can cross the TTL boundary without
//! sleeping. Constructed once per process and shared via `Arc` — never
//! a bare module-level global.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::adapters::metrics::EngineMetrics;
use crate::ports::clock::Clock;
use crate::ports::rate_provider::RateProvider;

/// Default cache TTL.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy)]
struct CachedRate {
    rate: Decimal,
    fetched_at: DateTime<Utc>,
}

/// TTL'd caching decorator over an ordered provider chain.
///
/// Implements `RateProvider` itself, so use cases depend on the same
/// trait whether or not a cache sits in front of the providers.
pub struct PriceOracleCache {
    providers: Vec<Arc<dyn RateProvider>>,
    ttl: chrono::Duration,
    clock: Arc<dyn Clock>,
    cached: RwLock<Option<CachedRate>>,
    metrics: Option<Arc<EngineMetrics>>,
}

impl PriceOracleCache {
    /// Create a cache over the given providers, tried in order.
    pub fn new(
        providers: Vec<Arc<dyn RateProvider>>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            providers,
            ttl: chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::seconds(60)),
            clock,
            cached: RwLock::new(None),
            metrics: None,
        }
    }

    /// Attach the metrics registry for per-provider fetch counters.
    pub fn with_metrics(mut self, metrics: Arc<EngineMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    async fn fresh_cached(&self, now: DateTime<Utc>) -> Option<Decimal> {
        let guard = self.cached.read().await;
        guard
            .filter(|c| now - c.fetched_at < self.ttl)
            .map(|c| c.rate)
    }

    async fn try_providers(&self, now: DateTime<Utc>) -> Option<Decimal> {
        for provider in &self.providers {
            match provider.fetch_rate().await {
                Ok(rate) => {
                    debug!(provider = provider.name(), rate = %rate, "Oracle rate refreshed");
                    self.record_fetch(provider.name(), "success");
                    if let Some(m) = &self.metrics {
                        if let Ok(f) = rate.to_string().parse::<f64>() {
                            m.oracle_rate.set(f);
                        }
                    }
                    let mut guard = self.cached.write().await;
                    *guard = Some(CachedRate {
                        rate,
                        fetched_at: now,
                    });
                    return Some(rate);
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "Rate provider failed, trying next"
                    );
                    self.record_fetch(provider.name(), "error");
                }
            }
        }
        None
    }

    fn record_fetch(&self, provider: &str, outcome: &str) {
        if let Some(m) = &self.metrics {
            m.oracle_fetches.with_label_values(&[provider, outcome]).inc();
        }
    }
}

#[async_trait]
impl RateProvider for PriceOracleCache {
    fn name(&self) -> &str {
        "oracle-cache"
    }

    async fn fetch_rate(&self) -> Result<Decimal> {
        let now = self.clock.now();

        if let Some(rate) = self.fresh_cached(now).await {
            return Ok(rate);
        }

        if let Some(rate) = self.try_providers(now).await {
            return Ok(rate);
        }

        // All providers down: a stale rate still beats failing creation.
        let stale = self.cached.read().await.map(|c| c.rate);
        match stale {
            Some(rate) => {
                warn!(rate = %rate, "All rate providers failed, serving stale cached rate");
                Ok(rate)
            }
            None => anyhow::bail!("all rate providers failed and no cached rate exists"),
        }
    }
}

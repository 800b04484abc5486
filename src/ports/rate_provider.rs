//! Rate Provider Port - External Exchange Rate Interface
//!
//! Defines the trait for asset→USD exchange rate sources. Concrete
//! providers (CoinGecko, Coinbase) implement it over REST; the
//! `PriceOracleCache` implements it as a TTL'd decorator over a
//! provider chain, so use cases depend on one trait either way.

use async_trait::async_trait;
use rust_decimal::Decimal;

/// Trait for exchange rate providers.
///
/// Errors are transport-level (`anyhow`); the use-case layer maps a
/// total failure to `EngineError::OracleUnavailable`.
#[async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Short provider name for logs and metrics labels.
    fn name(&self) -> &str;

    /// Fetch the current asset→USD rate.
    async fn fetch_rate(&self) -> anyhow::Result<Decimal>;
}

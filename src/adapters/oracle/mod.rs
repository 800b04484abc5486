//! Oracle Adapters - External Exchange Rate Providers
//!
//! REST providers for the ETH→USD rate plus the TTL'd cache that sits
//! in front of them:
//! - CoinGecko: primary provider
//! - Coinbase: fallback provider
//! - PriceOracleCache: 60 s TTL, stale-serve on total provider failure

pub mod cache;
pub mod coinbase;
pub mod coingecko;

pub use cache::PriceOracleCache;
pub use coinbase::CoinbaseProvider;
pub use coingecko::CoinGeckoProvider;

//! CoinGecko Rate Provider - Primary ETH/USD Source
//!
//! Fetches the spot ETH→USD rate from CoinGecko's simple-price endpoint.
//! The request timeout is bounded per provider so a hung primary never
//! blocks the fallback chain.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;
use tracing::debug;

use crate::ports::rate_provider::RateProvider;

const DEFAULT_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=ethereum&vs_currencies=usd";

/// Response shape: `{"ethereum": {"usd": 3000.12}}`.
#[derive(Debug, Deserialize)]
struct SimplePrice {
    #[serde(flatten)]
    assets: HashMap<String, HashMap<String, f64>>,
}

/// CoinGecko REST rate provider.
pub struct CoinGeckoProvider {
    http: Client,
    url: String,
}

impl CoinGeckoProvider {
    /// Create a provider with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_url(DEFAULT_URL, timeout)
    }

    /// Create a provider against a custom endpoint (tests, mirrors).
    pub fn with_url(url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build CoinGecko HTTP client")?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl RateProvider for CoinGeckoProvider {
    fn name(&self) -> &str {
        "coingecko"
    }

    async fn fetch_rate(&self) -> Result<Decimal> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("CoinGecko request failed")?
            .error_for_status()
            .context("CoinGecko returned error status")?;

        let body: SimplePrice = response
            .json()
            .await
            .context("CoinGecko response was not valid JSON")?;

        let usd = body
            .assets
            .get("ethereum")
            .and_then(|rates| rates.get("usd"))
            .copied()
            .context("CoinGecko response missing ethereum.usd")?;

        let rate = Decimal::from_f64(usd)
            .filter(|r| *r > Decimal::ZERO)
            .context("CoinGecko returned a non-positive rate")?;

        debug!(rate = %rate, "CoinGecko rate fetched");
        Ok(rate)
    }
}

//! Coinbase Rate Provider - Fallback ETH/USD Source
//!
//! Secondary provider behind CoinGecko. Uses Coinbase's public
//! exchange-rates endpoint, which returns rates as strings — parsed
//! directly into `Decimal` with no float round-trip.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::ports::rate_provider::RateProvider;

const DEFAULT_URL: &str = "https://api.coinbase.com/v2/exchange-rates?currency=ETH";

/// Response shape: `{"data": {"currency": "ETH", "rates": {"USD": "3000.12", ...}}}`.
#[derive(Debug, Deserialize)]
struct ExchangeRates {
    data: RatesData,
}

#[derive(Debug, Deserialize)]
struct RatesData {
    rates: HashMap<String, String>,
}

/// Coinbase REST rate provider.
pub struct CoinbaseProvider {
    http: Client,
    url: String,
}

impl CoinbaseProvider {
    /// Create a provider with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_url(DEFAULT_URL, timeout)
    }

    /// Create a provider against a custom endpoint (tests, mirrors).
    pub fn with_url(url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build Coinbase HTTP client")?;
        Ok(Self {
            http,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl RateProvider for CoinbaseProvider {
    fn name(&self) -> &str {
        "coinbase"
    }

    async fn fetch_rate(&self) -> Result<Decimal> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("Coinbase request failed")?
            .error_for_status()
            .context("Coinbase returned error status")?;

        let body: ExchangeRates = response
            .json()
            .await
            .context("Coinbase response was not valid JSON")?;

        let usd = body
            .data
            .rates
            .get("USD")
            .context("Coinbase response missing USD rate")?;

        let rate: Decimal = usd
            .parse()
            .context("Coinbase USD rate was not a valid decimal")?;
        anyhow::ensure!(rate > Decimal::ZERO, "Coinbase returned a non-positive rate");

        debug!(rate = %rate, "Coinbase rate fetched");
        Ok(rate)
    }
}

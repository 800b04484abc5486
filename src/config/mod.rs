//! Configuration Module - TOML-based Engine Configuration
//!
//! Loads and validates configuration from `config.toml`. Provider
//! endpoints, ports, prize policy, and sweep cadence are all
//! externalized here - nothing is hardcoded in the domain layer.

pub mod loader;

use serde::Deserialize;

/// Top-level engine configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before the engine begins serving.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Service identity and ports.
    pub service: ServiceConfig,
    /// Price oracle cache and providers.
    pub oracle: OracleConfig,
    /// Contest policy knobs.
    pub contest: ContestConfig,
    /// Reminder sweep cadence.
    pub reminders: ReminderConfig,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Human-readable service name.
    pub name: String,
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Contest API port.
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Health/metrics port.
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
}

/// Price oracle configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// Cache TTL in seconds.
    #[serde(default = "default_oracle_ttl")]
    pub ttl_secs: u64,
    /// Per-provider request timeout in milliseconds.
    #[serde(default = "default_oracle_timeout")]
    pub timeout_ms: u64,
}

/// Contest policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ContestConfig {
    /// Minimum prize fiat value in USD.
    #[serde(default = "default_min_prize")]
    pub min_prize_usd: f64,
    /// Server-side suggestion cap per post. 0 disables the cap.
    #[serde(default = "default_suggestion_cap")]
    pub max_suggestions_per_post: u32,
}

/// Reminder sweep configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderConfig {
    /// Hours a post may stay unresolved before reminders start.
    #[serde(default = "default_stale_after")]
    pub stale_after_hours: i64,
    /// Interval between in-process sweeps, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_oracle_ttl() -> u64 {
    60
}

fn default_oracle_timeout() -> u64 {
    5000
}

fn default_min_prize() -> f64 {
    1.0
}

fn default_suggestion_cap() -> u32 {
    5
}

fn default_stale_after() -> i64 {
    24
}

fn default_sweep_interval() -> u64 {
    3600
}

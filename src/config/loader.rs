//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
    let path = Path::new(path);

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| "Failed to parse config.toml")?;

    validate_config(&config)?;

    info!(
        name = %config.service.name,
        min_prize_usd = config.contest.min_prize_usd,
        suggestion_cap = config.contest.max_suggestions_per_post,
        ttl_secs = config.oracle.ttl_secs,
        "Configuration loaded successfully"
    );

    Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
    anyhow::ensure!(
        !config.service.name.is_empty(),
        "service name must not be empty"
    );
    anyhow::ensure!(
        config.service.api_port != config.service.metrics_port,
        "api_port and metrics_port must differ, both are {}",
        config.service.api_port
    );

    anyhow::ensure!(
        config.oracle.ttl_secs > 0,
        "oracle ttl_secs must be positive"
    );
    anyhow::ensure!(
        config.oracle.timeout_ms > 0 && config.oracle.timeout_ms <= 30_000,
        "oracle timeout_ms must be in (0, 30000], got {}",
        config.oracle.timeout_ms
    );

    anyhow::ensure!(
        config.contest.min_prize_usd > 0.0,
        "min_prize_usd must be positive, got {}",
        config.contest.min_prize_usd
    );

    anyhow::ensure!(
        config.reminders.stale_after_hours > 0,
        "stale_after_hours must be positive, got {}",
        config.reminders.stale_after_hours
    );
    anyhow::ensure!(
        config.reminders.sweep_interval_secs >= 60,
        "sweep_interval_secs must be at least 60, got {}",
        config.reminders.sweep_interval_secs
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_toml() -> String {
        r#"
            [service]
            name = "namethat-engine"

            [oracle]

            [contest]

            [reminders]
        "#
        .to_string()
    }

    #[test]
    fn test_defaults_applied() {
        let config: AppConfig = toml::from_str(&base_toml()).unwrap();
        validate_config(&config).unwrap();
        assert_eq!(config.service.api_port, 8080);
        assert_eq!(config.service.metrics_port, 9090);
        assert_eq!(config.oracle.ttl_secs, 60);
        assert_eq!(config.contest.max_suggestions_per_post, 5);
        assert_eq!(config.reminders.stale_after_hours, 24);
    }

    #[test]
    fn test_rejects_colliding_ports() {
        let toml = r#"
            [service]
            name = "namethat-engine"
            api_port = 9090
            metrics_port = 9090

            [oracle]
            [contest]
            [reminders]
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_min_prize() {
        let toml = r#"
            [service]
            name = "namethat-engine"

            [oracle]

            [contest]
            min_prize_usd = 0.0

            [reminders]
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert!(validate_config(&config).is_err());
    }
}

//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP clients, HTTP server, in-memory stores).
//! Each sub-module groups adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `api`: Contest HTTP API (axum)
//! - `metrics`: Prometheus metrics export and health checks
//! - `oracle`: CoinGecko/Coinbase rate providers + TTL cache
//! - `persistence`: In-memory transactional contest store
//! - `queue`: Reminder queue and settlement sink

pub mod api;
pub mod metrics;
pub mod oracle;
pub mod persistence;
pub mod queue;

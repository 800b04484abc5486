//! Contest API Adapter - HTTP Transport
//!
//! Implements the engine's external request/response contracts over
//! axum. Handlers validate nothing themselves: raw strings flow into
//! the use cases, which own validation and the error taxonomy.
//!
//! Sub-modules:
//! - `routes`: Router construction and handlers
//! - `types`: JSON DTOs and the EngineError→status mapping

pub mod routes;
pub mod types;

pub use routes::{AppState, router};

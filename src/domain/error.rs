//! Engine error taxonomy.
//!
//! Every fallible operation in the engine surfaces one of these variants.
//! The split mirrors the caller's recovery options: input errors are fixed
//! by the caller, state errors are terminal for that request, and
//! `OracleUnavailable` is the only case with a local fallback (stale cache)
//! before it reaches the caller. Nothing here is retried by the engine.

use rust_decimal::Decimal;

/// Errors produced by the contest lifecycle and settlement engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Malformed address, out-of-range text, bad URL, non-positive prize.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Referenced post or suggestion does not exist (or is soft-deleted
    /// where deletion hides it).
    #[error("not found: {0}")]
    NotFound(String),

    /// Caller is not the authorized actor for this operation.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// State already transitioned (winner already selected, suggestion
    /// cap reached).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A vote already exists for this (voter, post) pair.
    #[error("voter has already voted on this post")]
    DuplicateVote,

    /// Operation requires a state the post is not in (e.g. delete before
    /// a winner is selected).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Prize funding below the fiat minimum at creation time.
    ///
    /// Carries the computed fiat value so the caller can adjust the
    /// prize amount.
    #[error("prize too low: ≈${fiat_value} is below the ${minimum} minimum")]
    InsufficientPrize {
        /// Fiat value computed from the oracle rate at creation.
        fiat_value: Decimal,
        /// Required minimum fiat value.
        minimum: Decimal,
    },

    /// All rate providers failed and no cached value exists.
    #[error("exchange rate unavailable from all providers")]
    OracleUnavailable,

    /// Unexpected storage or infrastructure failure. Opaque to callers.
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl EngineError {
    /// Convenience constructor for `InvalidInput`.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Convenience constructor for `NotFound`.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

//! Core contest domain types.
//!
//! Defines the persistent entities — Post, Suggestion, Vote — and the field
//! validation they require at creation. These types are the foundation of
//! the hexagonal architecture's inner ring: no I/O, fully serializable,
//! testable in isolation.
//!
//! Lifecycle rules enforced elsewhere (store/usecases) but stated here:
//! - A Post is never physically removed, only soft-deleted, and only after
//!   a winner has been selected.
//! - `winner_suggestion_id`, once set, is immutable.
//! - Suggestions and Votes are immutable and never deleted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::address::Address;
use super::error::EngineError;

// ────────────────────────────────────────────
// Type aliases consumed by ports and adapters
// ────────────────────────────────────────────

/// Lightweight post identifier used at the ports boundary.
pub type PostId = String;

/// Lightweight suggestion identifier used at the ports boundary.
pub type SuggestionId = String;

/// Lightweight vote identifier used at the ports boundary.
pub type VoteId = String;

/// Maximum post title length in characters.
pub const TITLE_MAX_CHARS: usize = 120;

/// Maximum post description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

/// Maximum suggestion text length in characters.
pub const SUGGESTION_MAX_CHARS: usize = 140;

// ────────────────────────────────────────────
// Entities
// ────────────────────────────────────────────

/// A naming contest with a funded prize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique post identifier (UUID v4).
    pub id: PostId,
    /// Contest creator's account address.
    pub creator: Address,
    /// Contest title (≤ 120 chars, trimmed).
    pub title: String,
    /// Contest description (≤ 2000 chars, trimmed).
    pub description: String,
    /// Optional image URL (http/https only).
    pub image_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Prize amount in the funding asset.
    pub prize_amount: Decimal,
    /// Fiat value of the prize at creation (oracle rate × prize amount).
    /// Snapshot only — never recomputed.
    pub fiat_value_at_creation: Decimal,
    /// Winning suggestion, set at most once by the creator.
    pub winner_suggestion_id: Option<SuggestionId>,
    /// Soft-delete flag. Only becomes true after a winner is set.
    pub deleted: bool,
}

impl Post {
    /// Whether the contest is still waiting for a winner decision.
    pub fn is_unresolved(&self) -> bool {
        !self.deleted && self.winner_suggestion_id.is_none()
    }
}

/// A candidate name submitted against a Post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    /// Unique suggestion identifier (UUID v4).
    pub id: SuggestionId,
    /// Owning post.
    pub post_id: PostId,
    /// Author's account address.
    pub author: Address,
    /// Suggested name (1–140 chars, trimmed).
    pub text: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One user's one-time endorsement of a Suggestion within a Post.
///
/// The (voter, post_id) pair is unique — enforced by the store, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    /// Unique vote identifier (UUID v4).
    pub id: VoteId,
    /// Post the vote belongs to.
    pub post_id: PostId,
    /// Suggestion being endorsed. Must belong to `post_id`.
    pub suggestion_id: SuggestionId,
    /// Voter's account address.
    pub voter: Address,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Generate a fresh entity identifier.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

// ────────────────────────────────────────────
// Field validation
// ────────────────────────────────────────────

/// Validate and trim a post title.
pub fn validate_title(raw: &str) -> Result<String, EngineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_input("title is required"));
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        return Err(EngineError::invalid_input(format!(
            "title exceeds {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate and trim a post description.
pub fn validate_description(raw: &str) -> Result<String, EngineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_input("description is required"));
    }
    if trimmed.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(EngineError::invalid_input(format!(
            "description exceeds {DESCRIPTION_MAX_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate an optional image URL. Only http/https schemes are accepted.
pub fn validate_image_url(raw: Option<&str>) -> Result<Option<String>, EngineError> {
    match raw {
        None => Ok(None),
        Some(url) if url.is_empty() => Ok(None),
        Some(url) => {
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(Some(url.to_string()))
            } else {
                Err(EngineError::invalid_input("image URL must be http or https"))
            }
        }
    }
}

/// Validate and trim suggestion text.
pub fn validate_suggestion_text(raw: &str) -> Result<String, EngineError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::invalid_input("suggestion text is required"));
    }
    if trimmed.chars().count() > SUGGESTION_MAX_CHARS {
        return Err(EngineError::invalid_input(format!(
            "suggestion exceeds {SUGGESTION_MAX_CHARS} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a prize amount: must be strictly positive.
pub fn validate_prize_amount(amount: Decimal) -> Result<Decimal, EngineError> {
    if amount <= Decimal::ZERO {
        return Err(EngineError::invalid_input("prize amount must be positive"));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_title_trimmed_and_bounded() {
        assert_eq!(validate_title("  Name my boat  ").unwrap(), "Name my boat");
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(TITLE_MAX_CHARS + 1)).is_err());
        assert!(validate_title(&"x".repeat(TITLE_MAX_CHARS)).is_ok());
    }

    #[test]
    fn test_description_bounded() {
        assert!(validate_description("").is_err());
        assert!(validate_description(&"d".repeat(DESCRIPTION_MAX_CHARS)).is_ok());
        assert!(validate_description(&"d".repeat(DESCRIPTION_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn test_image_url_scheme_check() {
        assert_eq!(validate_image_url(None).unwrap(), None);
        assert_eq!(validate_image_url(Some("")).unwrap(), None);
        assert!(validate_image_url(Some("https://cdn.example/img.png")).is_ok());
        assert!(validate_image_url(Some("http://cdn.example/img.png")).is_ok());
        assert!(validate_image_url(Some("ftp://cdn.example/img.png")).is_err());
        assert!(validate_image_url(Some("javascript:alert(1)")).is_err());
    }

    #[test]
    fn test_suggestion_text_bounded() {
        assert_eq!(validate_suggestion_text(" Biscuit ").unwrap(), "Biscuit");
        assert!(validate_suggestion_text("  ").is_err());
        assert!(validate_suggestion_text(&"s".repeat(SUGGESTION_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn test_prize_must_be_positive() {
        assert!(validate_prize_amount(dec!(0)).is_err());
        assert!(validate_prize_amount(dec!(-0.5)).is_err());
        assert_eq!(validate_prize_amount(dec!(0.25)).unwrap(), dec!(0.25));
    }

    #[test]
    fn test_unresolved_requires_no_winner_and_not_deleted() {
        let mut post = Post {
            id: new_id(),
            creator: Address::parse("0x0000000000000000000000000000000000000001").unwrap(),
            title: "t".into(),
            description: "d".into(),
            image_url: None,
            created_at: Utc::now(),
            prize_amount: dec!(0.01),
            fiat_value_at_creation: dec!(30),
            winner_suggestion_id: None,
            deleted: false,
        };
        assert!(post.is_unresolved());
        post.winner_suggestion_id = Some(new_id());
        assert!(!post.is_unresolved());
    }
}

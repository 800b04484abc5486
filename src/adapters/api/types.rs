//! API Request/Response Types and Error Mapping
//!
//! JSON DTOs for the contest HTTP surface, plus the single place where
//! `EngineError` variants map to HTTP status codes:
//!
//! - `InvalidInput` / `InsufficientPrize` → 400
//! - `Forbidden` → 403
//! - `NotFound` → 404
//! - `Conflict` / `DuplicateVote` / `InvalidState` → 409
//! - `OracleUnavailable` → 503
//! - `Internal` → 500 (opaque body, details stay in logs)

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::contest::{Post, PostId, Suggestion, SuggestionId, Vote};
use crate::domain::error::EngineError;
use crate::domain::leaderboard::LeaderboardEntry;
use crate::ports::reminder_queue::ReminderMessage;

// ── Requests ────────────────────────────────────────────────

/// Create-post request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostBody {
    pub creator: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub prize_amount: Decimal,
}

/// Add-suggestion request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSuggestionBody {
    pub post_id: PostId,
    pub author: String,
    pub text: String,
}

/// Cast-vote request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastVoteBody {
    pub post_id: PostId,
    pub suggestion_id: SuggestionId,
    pub voter: String,
}

/// Select-winner request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectWinnerBody {
    pub post_id: PostId,
    pub winner_suggestion_id: SuggestionId,
    pub caller: String,
}

/// Query string for list endpoints scoped by post.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostScopeQuery {
    pub post_id: Option<PostId>,
}

/// Query string for the posts listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    #[serde(default)]
    pub include_deleted: bool,
}

/// Query string for the leaderboard.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardQuery {
    pub mode: Option<String>,
}

/// Query string carrying the caller address (delete endpoint).
#[derive(Debug, Deserialize)]
pub struct CallerQuery {
    #[serde(default)]
    pub caller: String,
}

// ── Responses ───────────────────────────────────────────────

/// `{post}` envelope.
#[derive(Debug, Serialize)]
pub struct PostEnvelope {
    pub post: Post,
}

/// `{posts}` envelope.
#[derive(Debug, Serialize)]
pub struct PostsEnvelope {
    pub posts: Vec<Post>,
}

/// `{suggestion}` envelope.
#[derive(Debug, Serialize)]
pub struct SuggestionEnvelope {
    pub suggestion: Suggestion,
}

/// `{suggestions}` envelope.
#[derive(Debug, Serialize)]
pub struct SuggestionsEnvelope {
    pub suggestions: Vec<Suggestion>,
}

/// `{vote}` envelope.
#[derive(Debug, Serialize)]
pub struct VoteEnvelope {
    pub vote: Vote,
}

/// `{votes}` envelope.
#[derive(Debug, Serialize)]
pub struct VotesEnvelope {
    pub votes: Vec<Vote>,
}

/// `{ok:true}` acknowledgement.
#[derive(Debug, Serialize)]
pub struct OkEnvelope {
    pub ok: bool,
}

/// Leaderboard response: exactly one of the two lists is present.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_time: Option<Vec<LeaderboardEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trending: Option<Vec<LeaderboardEntry>>,
}

/// Reminder sweep response.
#[derive(Debug, Serialize)]
pub struct SweepEnvelope {
    pub count: usize,
    pub reminders: Vec<ReminderMessage>,
}

/// Error body: `{error}` message string.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

// ── Error mapping ───────────────────────────────────────────

/// Wrapper so `EngineError` can be returned straight from handlers.
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            EngineError::InvalidInput(_) | EngineError::InsufficientPrize { .. } => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }
            EngineError::Forbidden(_) => (StatusCode::FORBIDDEN, self.0.to_string()),
            EngineError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            EngineError::Conflict(_)
            | EngineError::DuplicateVote
            | EngineError::InvalidState(_) => (StatusCode::CONFLICT, self.0.to_string()),
            EngineError::OracleUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, self.0.to_string())
            }
            EngineError::Internal(e) => {
                error!(error = %e, "Internal error surfaced to API");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

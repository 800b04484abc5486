//! Contest Repository Port - Transactional Store Interface
//!
//! Defines the trait for persisting Users, Posts, Suggestions, and Votes.
//! The two concurrency-critical invariants live HERE, not in application
//! code, so a second concurrent attempt fails atomically instead of racing
//! a check-then-act:
//!
//! - `insert_vote` enforces uniqueness on (voter, post_id). A relational
//!   backend maps this to a unique index; the in-memory adapter holds a
//!   single write lock across check and insert.
//! - `set_winner_if_unset` is a conditional update (set-if-null). Of N
//!   concurrent calls exactly one succeeds; the rest get `Conflict`.
//!
//! All reads return entities ordered by `created_at` descending unless
//! noted. Methods return `EngineError` so adapters can surface the typed
//! taxonomy (`DuplicateVote`, `Conflict`, `NotFound`) directly from the
//! storage primitive that detected it.

use async_trait::async_trait;

use crate::domain::address::Address;
use crate::domain::contest::{Post, PostId, Suggestion, SuggestionId, Vote};
use crate::domain::error::EngineError;

/// Trait for transactional contest storage providers.
#[async_trait]
pub trait ContestRepository: Send + Sync + 'static {
    /// Idempotent insert-ignore of a user row. Called before every
    /// post/suggestion/vote write.
    async fn ensure_user(&self, address: &Address) -> Result<(), EngineError>;

    /// Persist a new post. The post arrives fully validated.
    async fn insert_post(&self, post: Post) -> Result<Post, EngineError>;

    /// Fetch a post by id, including soft-deleted ones.
    async fn get_post(&self, id: &PostId) -> Result<Option<Post>, EngineError>;

    /// All posts, newest first. Soft-deleted posts are filtered unless
    /// `include_deleted` is set.
    async fn list_posts(&self, include_deleted: bool) -> Result<Vec<Post>, EngineError>;

    /// Persist a suggestion, atomically enforcing the per-post cap when
    /// `max_per_post` is set.
    ///
    /// Fails `NotFound` if the post is missing or deleted, `Conflict` if
    /// the cap is reached. Cap check and insert happen under one lock.
    async fn insert_suggestion(
        &self,
        suggestion: Suggestion,
        max_per_post: Option<u32>,
    ) -> Result<Suggestion, EngineError>;

    /// Fetch a suggestion by id.
    async fn get_suggestion(&self, id: &SuggestionId) -> Result<Option<Suggestion>, EngineError>;

    /// Suggestions, newest first, optionally scoped to one post.
    async fn list_suggestions(
        &self,
        post_id: Option<&PostId>,
    ) -> Result<Vec<Suggestion>, EngineError>;

    /// Persist a vote, atomically enforcing uniqueness on (voter, post).
    ///
    /// Fails `NotFound` if the post or suggestion is absent or the
    /// suggestion belongs to a different post; `DuplicateVote` if the
    /// voter already voted on this post. Existence check, uniqueness
    /// check, and insert happen under one lock.
    async fn insert_vote(&self, vote: Vote) -> Result<Vote, EngineError>;

    /// Votes, newest first, optionally scoped to one post.
    async fn list_votes(&self, post_id: Option<&PostId>) -> Result<Vec<Vote>, EngineError>;

    /// Votes cast for one specific suggestion.
    async fn votes_for_suggestion(
        &self,
        suggestion_id: &SuggestionId,
    ) -> Result<Vec<Vote>, EngineError>;

    /// Conditionally set the winner: succeeds only while
    /// `winner_suggestion_id` is null. One-way transition.
    ///
    /// Fails `NotFound` if the post is missing, `Conflict` if a winner
    /// is already set. Returns the updated post.
    async fn set_winner_if_unset(
        &self,
        post_id: &PostId,
        suggestion_id: &SuggestionId,
    ) -> Result<Post, EngineError>;

    /// Soft-delete a post. Caller authorization and state checks happen
    /// in the use case; this just flips the flag.
    async fn mark_deleted(&self, post_id: &PostId) -> Result<(), EngineError>;

    /// Check if the repository backend is reachable/healthy.
    async fn is_healthy(&self) -> bool;
}

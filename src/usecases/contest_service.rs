//! Contest Service - Post/Suggestion/Vote Lifecycle
//!
//! Orchestrates the write path for contests: validates input at the
//! boundary, consults the oracle cache for prize gating, runs the
//! idempotent ensure-user step, and delegates the concurrency-critical
//! inserts to the repository's atomic primitives. Also serves the read
//! accessors and the leaderboard queries.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::domain::address::Address;
use crate::domain::contest::{
    self, Post, PostId, Suggestion, SuggestionId, Vote, new_id,
};
use crate::domain::error::EngineError;
use crate::domain::leaderboard::{self, LeaderboardEntry};
use crate::ports::contest_repository::ContestRepository;
use crate::ports::rate_provider::RateProvider;

/// Leaderboard query mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardMode {
    /// Total vote count ranking.
    AllTime,
    /// Time-decayed recency ranking.
    Trending,
}

/// Validated request to create a post. Addresses and text arrive raw
/// from the transport layer; validation happens inside `create_post`.
#[derive(Debug, Clone)]
pub struct CreatePostRequest {
    /// Creator address, unvalidated.
    pub creator: String,
    /// Title, untrimmed.
    pub title: String,
    /// Description, untrimmed.
    pub description: String,
    /// Optional image URL.
    pub image_url: Option<String>,
    /// Prize amount in the funding asset.
    pub prize_amount: Decimal,
}

/// Contest lifecycle orchestrator over a repository and the rate oracle.
pub struct ContestService<R: ContestRepository> {
    repo: Arc<R>,
    rates: Arc<dyn RateProvider>,
    /// Minimum fiat value a prize must clear at creation.
    min_prize_fiat: Decimal,
    /// Server-side suggestion cap per post. `None` disables the cap.
    max_suggestions_per_post: Option<u32>,
}

impl<R: ContestRepository> ContestService<R> {
    /// Create the service.
    pub fn new(
        repo: Arc<R>,
        rates: Arc<dyn RateProvider>,
        min_prize_fiat: Decimal,
        max_suggestions_per_post: Option<u32>,
    ) -> Self {
        Self {
            repo,
            rates,
            min_prize_fiat,
            max_suggestions_per_post,
        }
    }

    /// Create a contest post.
    ///
    /// Validates all fields, prices the prize through the oracle cache,
    /// and rejects with `InsufficientPrize` below the fiat minimum.
    #[instrument(skip(self, request), fields(creator = %request.creator))]
    pub async fn create_post(&self, request: CreatePostRequest) -> Result<Post, EngineError> {
        let creator = Address::parse(&request.creator)?;
        let title = contest::validate_title(&request.title)?;
        let description = contest::validate_description(&request.description)?;
        let image_url = contest::validate_image_url(request.image_url.as_deref())?;
        let prize_amount = contest::validate_prize_amount(request.prize_amount)?;

        let rate = self.rates.fetch_rate().await.map_err(|e| {
            warn!(error = %e, "Rate fetch failed, rejecting post creation");
            EngineError::OracleUnavailable
        })?;

        let fiat_value = (prize_amount * rate).round_dp(2);
        if fiat_value < self.min_prize_fiat {
            return Err(EngineError::InsufficientPrize {
                fiat_value,
                minimum: self.min_prize_fiat,
            });
        }

        self.repo.ensure_user(&creator).await?;

        let post = Post {
            id: new_id(),
            creator,
            title,
            description,
            image_url,
            created_at: Utc::now(),
            prize_amount,
            fiat_value_at_creation: fiat_value,
            winner_suggestion_id: None,
            deleted: false,
        };
        let post = self.repo.insert_post(post).await?;

        info!(
            post_id = %post.id,
            prize = %post.prize_amount,
            fiat = %post.fiat_value_at_creation,
            "Post created"
        );
        Ok(post)
    }

    /// Submit a name suggestion against a post.
    #[instrument(skip(self, text))]
    pub async fn add_suggestion(
        &self,
        post_id: &PostId,
        author: &str,
        text: &str,
    ) -> Result<Suggestion, EngineError> {
        if post_id.is_empty() {
            return Err(EngineError::invalid_input("postId is required"));
        }
        let author = Address::parse(author)?;
        let text = contest::validate_suggestion_text(text)?;

        self.repo.ensure_user(&author).await?;

        let suggestion = Suggestion {
            id: new_id(),
            post_id: post_id.clone(),
            author,
            text,
            created_at: Utc::now(),
        };
        // Post existence, deletion, and the per-post cap are enforced
        // atomically inside the store.
        let suggestion = self
            .repo
            .insert_suggestion(suggestion, self.max_suggestions_per_post)
            .await?;

        info!(post_id = %post_id, suggestion_id = %suggestion.id, "Suggestion added");
        Ok(suggestion)
    }

    /// Cast a vote for a suggestion within a post.
    ///
    /// Uniqueness of (voter, post) is enforced by the repository's
    /// atomic insert, never by an application-level check.
    #[instrument(skip(self))]
    pub async fn cast_vote(
        &self,
        post_id: &PostId,
        suggestion_id: &SuggestionId,
        voter: &str,
    ) -> Result<Vote, EngineError> {
        if post_id.is_empty() || suggestion_id.is_empty() {
            return Err(EngineError::invalid_input(
                "postId and suggestionId are required",
            ));
        }
        let voter = Address::parse(voter)?;

        self.repo.ensure_user(&voter).await?;

        let vote = Vote {
            id: new_id(),
            post_id: post_id.clone(),
            suggestion_id: suggestion_id.clone(),
            voter,
            created_at: Utc::now(),
        };
        let vote = self.repo.insert_vote(vote).await?;

        info!(post_id = %post_id, suggestion_id = %suggestion_id, "Vote cast");
        Ok(vote)
    }

    /// Soft-delete a post. Creator-only, and only after a winner exists.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: &PostId, caller: &str) -> Result<(), EngineError> {
        let caller = Address::parse(caller)?;

        let post = self
            .repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| EngineError::not_found("post not found"))?;

        if caller != post.creator {
            return Err(EngineError::Forbidden(
                "only the creator can delete a post".into(),
            ));
        }
        if post.winner_suggestion_id.is_none() {
            return Err(EngineError::InvalidState(
                "cannot delete until a winner is selected".into(),
            ));
        }

        self.repo.mark_deleted(post_id).await?;
        info!(post_id = %post_id, "Post soft-deleted");
        Ok(())
    }

    /// All posts, newest first. Deleted posts hidden unless requested.
    pub async fn list_posts(&self, include_deleted: bool) -> Result<Vec<Post>, EngineError> {
        self.repo.list_posts(include_deleted).await
    }

    /// Suggestions, newest first, optionally scoped to a post.
    pub async fn list_suggestions(
        &self,
        post_id: Option<&PostId>,
    ) -> Result<Vec<Suggestion>, EngineError> {
        self.repo.list_suggestions(post_id).await
    }

    /// Votes, newest first, optionally scoped to a post.
    pub async fn list_votes(&self, post_id: Option<&PostId>) -> Result<Vec<Vote>, EngineError> {
        self.repo.list_votes(post_id).await
    }

    /// Compute the leaderboard for the given mode at `now`.
    ///
    /// Pure recomputation over current store data — no caching.
    pub async fn leaderboard(
        &self,
        mode: LeaderboardMode,
        now: DateTime<Utc>,
    ) -> Result<Vec<LeaderboardEntry>, EngineError> {
        let posts = self.repo.list_posts(true).await?;
        let votes = self.repo.list_votes(None).await?;
        Ok(match mode {
            LeaderboardMode::AllTime => leaderboard::all_time(&posts, &votes),
            LeaderboardMode::Trending => leaderboard::trending(&posts, &votes, now),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::persistence::InMemoryStore;
    use anyhow::Result;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    struct FixedRate(Decimal);

    #[async_trait]
    impl RateProvider for FixedRate {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_rate(&self) -> Result<Decimal> {
            Ok(self.0)
        }
    }

    struct DownRate;

    #[async_trait]
    impl RateProvider for DownRate {
        fn name(&self) -> &str {
            "down"
        }

        async fn fetch_rate(&self) -> Result<Decimal> {
            anyhow::bail!("provider offline")
        }
    }

    const CREATOR: &str = "0x00000000000000000000000000000000000000a1";
    const OTHER: &str = "0x00000000000000000000000000000000000000b2";

    fn service_with_rate(rate: Decimal) -> ContestService<InMemoryStore> {
        ContestService::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(FixedRate(rate)),
            dec!(1),
            Some(5),
        )
    }

    fn request(prize: Decimal) -> CreatePostRequest {
        CreatePostRequest {
            creator: CREATOR.into(),
            title: "Name my rover".into(),
            description: "Six wheels, very dusty".into(),
            image_url: None,
            prize_amount: prize,
        }
    }

    #[tokio::test]
    async fn test_prize_below_minimum_rejected_with_fiat_value() {
        // rate 3000 × 0.0002 = $0.60 < $1.00
        let service = service_with_rate(dec!(3000));
        let err = service.create_post(request(dec!(0.0002))).await.unwrap_err();
        match err {
            EngineError::InsufficientPrize { fiat_value, minimum } => {
                assert_eq!(fiat_value, dec!(0.60));
                assert_eq!(minimum, dec!(1));
            }
            other => panic!("expected InsufficientPrize, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_prize_at_or_above_minimum_accepted() {
        // rate 3000 × 0.0004 = $1.20 ≥ $1.00
        let service = service_with_rate(dec!(3000));
        let post = service.create_post(request(dec!(0.0004))).await.unwrap();
        assert_eq!(post.fiat_value_at_creation, dec!(1.20));
        assert!(post.winner_suggestion_id.is_none());
        assert!(!post.deleted);
    }

    #[tokio::test]
    async fn test_create_post_fails_loudly_when_oracle_down() {
        let service = ContestService::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(DownRate),
            dec!(1),
            None,
        );
        let err = service.create_post(request(dec!(1))).await.unwrap_err();
        assert!(matches!(err, EngineError::OracleUnavailable));
    }

    #[tokio::test]
    async fn test_create_post_rejects_malformed_creator() {
        let service = service_with_rate(dec!(3000));
        let mut req = request(dec!(1));
        req.creator = "not-an-address".into();
        assert!(matches!(
            service.create_post(req).await.unwrap_err(),
            EngineError::InvalidInput(_)
        ));
    }

    #[tokio::test]
    async fn test_suggestion_flow_and_cap() {
        let service = service_with_rate(dec!(3000));
        let post = service.create_post(request(dec!(1))).await.unwrap();

        for i in 0..5 {
            service
                .add_suggestion(&post.id, OTHER, &format!("Name {i}"))
                .await
                .unwrap();
        }
        let err = service
            .add_suggestion(&post.id, OTHER, "One too many")
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_suggestion_on_missing_post_not_found() {
        let service = service_with_rate(dec!(3000));
        let err = service
            .add_suggestion(&"nope".to_string(), OTHER, "Ghost")
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_vote_once_then_duplicate() {
        let service = service_with_rate(dec!(3000));
        let post = service.create_post(request(dec!(1))).await.unwrap();
        let s = service
            .add_suggestion(&post.id, OTHER, "Biscuit")
            .await
            .unwrap();

        service.cast_vote(&post.id, &s.id, OTHER).await.unwrap();
        let err = service.cast_vote(&post.id, &s.id, OTHER).await.unwrap_err();
        assert!(matches!(err, EngineError::DuplicateVote));
    }

    #[tokio::test]
    async fn test_delete_before_winner_is_invalid_state() {
        let service = service_with_rate(dec!(3000));
        let post = service.create_post(request(dec!(1))).await.unwrap();
        let err = service.delete_post(&post.id, CREATOR).await.unwrap_err();
        assert!(matches!(err, EngineError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_delete_by_non_creator_forbidden() {
        let service = service_with_rate(dec!(3000));
        let post = service.create_post(request(dec!(1))).await.unwrap();
        let err = service.delete_post(&post.id, OTHER).await.unwrap_err();
        assert!(matches!(err, EngineError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_delete_caller_compare_is_case_insensitive() {
        let service = service_with_rate(dec!(3000));
        let post = service.create_post(request(dec!(1))).await.unwrap();
        // Winner must exist before delete is allowed; wire it directly.
        let s = service
            .add_suggestion(&post.id, OTHER, "Biscuit")
            .await
            .unwrap();
        service
            .repo
            .set_winner_if_unset(&post.id, &s.id)
            .await
            .unwrap();

        let upper = CREATOR.to_ascii_uppercase().replacen("0X", "0x", 1);
        service.delete_post(&post.id, &upper).await.unwrap();
        assert!(service.list_posts(false).await.unwrap().is_empty());
    }
}

//! Winner Resolver - One-Way Winner Commitment
//!
//! Validates a creator's winner decision and commits it through the
//! repository's atomic set-if-unset primitive, then emits the settlement
//! record for the external payout collaborator. The engine records the
//! decision only; no funds move here.
//!
//! Check order: malformed caller → post missing → winner already set →
//! caller not creator → suggestion missing/mismatched → atomic commit.
//! The commit re-checks the winner slot, so two concurrent calls resolve
//! to exactly one success and one `Conflict` regardless of interleaving.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::address::Address;
use crate::domain::contest::{Post, PostId, SuggestionId};
use crate::domain::error::EngineError;
use crate::domain::settlement::{SettlementRecord, SplitRatios};
use crate::ports::contest_repository::ContestRepository;
use crate::ports::settlement_sink::SettlementSink;

/// Commits winner decisions and emits settlement records.
pub struct WinnerResolver<R: ContestRepository> {
    repo: Arc<R>,
    sink: Arc<dyn SettlementSink>,
}

impl<R: ContestRepository> WinnerResolver<R> {
    /// Create a resolver over the given store and payout boundary.
    pub fn new(repo: Arc<R>, sink: Arc<dyn SettlementSink>) -> Self {
        Self { repo, sink }
    }

    /// Select the winning suggestion for a post.
    ///
    /// One-way transition: once `winner_suggestion_id` is set it can
    /// never change, and later calls fail with `Conflict`.
    #[instrument(skip(self))]
    pub async fn select_winner(
        &self,
        post_id: &PostId,
        winner_suggestion_id: &SuggestionId,
        caller: &str,
    ) -> Result<Post, EngineError> {
        let caller = Address::parse(caller)?;

        let post = self
            .repo
            .get_post(post_id)
            .await?
            .ok_or_else(|| EngineError::not_found("post not found"))?;

        if post.winner_suggestion_id.is_some() {
            return Err(EngineError::Conflict("winner already selected".into()));
        }
        if caller != post.creator {
            return Err(EngineError::Forbidden(
                "only the creator can select a winner".into(),
            ));
        }

        let suggestion = self
            .repo
            .get_suggestion(winner_suggestion_id)
            .await?
            .filter(|s| &s.post_id == post_id)
            .ok_or_else(|| {
                EngineError::invalid_input("suggestion does not exist for this post")
            })?;

        // Atomic set-if-null: concurrent racers get Conflict here even
        // if they passed the advisory check above.
        let updated = self
            .repo
            .set_winner_if_unset(post_id, winner_suggestion_id)
            .await?;

        let voters = self.repo.votes_for_suggestion(winner_suggestion_id).await?;
        let record = SettlementRecord {
            post_id: post_id.clone(),
            winner_suggestion_id: winner_suggestion_id.clone(),
            winner_author: suggestion.author,
            voter_addresses: voters.into_iter().map(|v| v.voter).collect(),
            split: SplitRatios::standard(),
        };

        // The decision is already committed; a sink failure must not
        // roll it back. Surface it in logs and move on.
        if let Err(e) = self.sink.publish(&record).await {
            warn!(post_id = %post_id, error = %e, "Settlement sink publish failed");
        }

        info!(
            post_id = %post_id,
            winner_suggestion_id = %winner_suggestion_id,
            voters = record.voter_addresses.len(),
            "Winner selected"
        );
        Ok(updated)
    }
}

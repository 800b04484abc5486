//! In-Memory Contest Store - Reference Repository Adapter
//!
//! A transactional in-memory implementation of the `ContestRepository`
//! port. All mutation happens under a single `tokio::sync::RwLock` write
//! guard, which gives the same atomicity a relational backend gets from
//! a unique index on (voter, post_id) and a conditional
//! `UPDATE ... WHERE winner_suggestion_id IS NULL`:
//!
//! - vote uniqueness: the `vote_index` map is checked and inserted under
//!   one write guard, so concurrent duplicates resolve to exactly one
//!   success and one `DuplicateVote`.
//! - winner selection: the null-check and write of `winner_suggestion_id`
//!   happen under one write guard (set-if-null).
//!
//! Entities are stored in insertion order; list reads sort by
//! `created_at` descending with insertion order as the stable tie-break.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::address::Address;
use crate::domain::contest::{Post, PostId, Suggestion, SuggestionId, Vote};
use crate::domain::error::EngineError;
use crate::ports::contest_repository::ContestRepository;

#[derive(Default)]
struct StoreInner {
    users: HashSet<Address>,
    posts: HashMap<PostId, Post>,
    post_order: Vec<PostId>,
    suggestions: Vec<Suggestion>,
    suggestion_counts: HashMap<PostId, u32>,
    votes: Vec<Vote>,
    /// Uniqueness constraint on (voter, post_id).
    vote_index: HashSet<(Address, PostId)>,
}

/// In-memory reference implementation of `ContestRepository`.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first<T, F>(mut items: Vec<T>, created_at: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    // Stable sort keeps insertion order for identical timestamps.
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    items
}

#[async_trait]
impl ContestRepository for InMemoryStore {
    async fn ensure_user(&self, address: &Address) -> Result<(), EngineError> {
        let mut inner = self.inner.write().await;
        // HashSet::insert is the insert-ignore-on-conflict primitive here.
        if inner.users.insert(address.clone()) {
            debug!(user = %address, "User created");
        }
        Ok(())
    }

    async fn insert_post(&self, post: Post) -> Result<Post, EngineError> {
        let mut inner = self.inner.write().await;
        inner.post_order.push(post.id.clone());
        inner.posts.insert(post.id.clone(), post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>, EngineError> {
        let inner = self.inner.read().await;
        Ok(inner.posts.get(id).cloned())
    }

    async fn list_posts(&self, include_deleted: bool) -> Result<Vec<Post>, EngineError> {
        let inner = self.inner.read().await;
        let posts: Vec<Post> = inner
            .post_order
            .iter()
            .filter_map(|id| inner.posts.get(id))
            .filter(|p| include_deleted || !p.deleted)
            .cloned()
            .collect();
        Ok(newest_first(posts, |p| p.created_at))
    }

    async fn insert_suggestion(
        &self,
        suggestion: Suggestion,
        max_per_post: Option<u32>,
    ) -> Result<Suggestion, EngineError> {
        let mut inner = self.inner.write().await;

        match inner.posts.get(&suggestion.post_id) {
            None => return Err(EngineError::not_found("post not found")),
            Some(post) if post.deleted => return Err(EngineError::not_found("post not found")),
            Some(_) => {}
        }

        let count = inner
            .suggestion_counts
            .get(&suggestion.post_id)
            .copied()
            .unwrap_or(0);
        if let Some(cap) = max_per_post {
            if count >= cap {
                return Err(EngineError::Conflict(format!(
                    "post already has the maximum of {cap} suggestions"
                )));
            }
        }

        inner
            .suggestion_counts
            .insert(suggestion.post_id.clone(), count + 1);
        inner.suggestions.push(suggestion.clone());
        Ok(suggestion)
    }

    async fn get_suggestion(&self, id: &SuggestionId) -> Result<Option<Suggestion>, EngineError> {
        let inner = self.inner.read().await;
        Ok(inner.suggestions.iter().find(|s| &s.id == id).cloned())
    }

    async fn list_suggestions(
        &self,
        post_id: Option<&PostId>,
    ) -> Result<Vec<Suggestion>, EngineError> {
        let inner = self.inner.read().await;
        let suggestions: Vec<Suggestion> = inner
            .suggestions
            .iter()
            .filter(|s| post_id.is_none_or(|id| &s.post_id == id))
            .cloned()
            .collect();
        Ok(newest_first(suggestions, |s| s.created_at))
    }

    async fn insert_vote(&self, vote: Vote) -> Result<Vote, EngineError> {
        let mut inner = self.inner.write().await;

        if !inner.posts.contains_key(&vote.post_id) {
            return Err(EngineError::not_found("post not found"));
        }
        let suggestion_post = inner
            .suggestions
            .iter()
            .find(|s| s.id == vote.suggestion_id)
            .map(|s| s.post_id.clone());
        match suggestion_post {
            None => return Err(EngineError::not_found("suggestion not found")),
            Some(owner) if owner != vote.post_id => {
                return Err(EngineError::not_found(
                    "suggestion does not belong to this post",
                ));
            }
            Some(_) => {}
        }

        let key = (vote.voter.clone(), vote.post_id.clone());
        if !inner.vote_index.insert(key) {
            return Err(EngineError::DuplicateVote);
        }

        inner.votes.push(vote.clone());
        Ok(vote)
    }

    async fn list_votes(&self, post_id: Option<&PostId>) -> Result<Vec<Vote>, EngineError> {
        let inner = self.inner.read().await;
        let votes: Vec<Vote> = inner
            .votes
            .iter()
            .filter(|v| post_id.is_none_or(|id| &v.post_id == id))
            .cloned()
            .collect();
        Ok(newest_first(votes, |v| v.created_at))
    }

    async fn votes_for_suggestion(
        &self,
        suggestion_id: &SuggestionId,
    ) -> Result<Vec<Vote>, EngineError> {
        let inner = self.inner.read().await;
        Ok(inner
            .votes
            .iter()
            .filter(|v| &v.suggestion_id == suggestion_id)
            .cloned()
            .collect())
    }

    async fn set_winner_if_unset(
        &self,
        post_id: &PostId,
        suggestion_id: &SuggestionId,
    ) -> Result<Post, EngineError> {
        let mut inner = self.inner.write().await;
        let post = inner
            .posts
            .get_mut(post_id)
            .ok_or_else(|| EngineError::not_found("post not found"))?;

        if post.winner_suggestion_id.is_some() {
            return Err(EngineError::Conflict("winner already selected".into()));
        }

        post.winner_suggestion_id = Some(suggestion_id.clone());
        Ok(post.clone())
    }

    async fn mark_deleted(&self, post_id: &PostId) -> Result<(), EngineError> {
        let mut inner = self.inner.write().await;
        let post = inner
            .posts
            .get_mut(post_id)
            .ok_or_else(|| EngineError::not_found("post not found"))?;
        post.deleted = true;
        Ok(())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

//! Leaderboard scoring — all-time and trending ranking.
//!
//! Pure functions over `(posts, votes, now)`. No caching, no mutation:
//! each query recomputes from the authoritative vote table, so the output
//! is reproducible for identical inputs and a fixed `now`.
//!
//! Trending uses a hyperbolic time decay: a vote cast now weighs 1.0,
//! a vote 23 hours old weighs ≈0.0417. Deleted posts never rank.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::contest::{Post, PostId, Vote};

/// Maximum number of leaderboard entries returned.
pub const LEADERBOARD_LIMIT: usize = 100;

/// A derived ranking entry. Never persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    /// Ranked post.
    pub post_id: PostId,
    /// Total persisted votes (all-time mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_votes: Option<u64>,
    /// Time-decayed vote weight sum (trending mode).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Decay weight of a single vote of the given age.
///
/// `1 / (1 + age_hours)`, clamped so future-dated votes weigh 1.0.
pub fn decay_weight(vote_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_hours = (now - vote_at).num_milliseconds() as f64 / 3_600_000.0;
    1.0 / (1.0 + age_hours.max(0.0))
}

/// All-time ranking: total vote count per non-deleted post, descending,
/// top 100. Ties break by `post_id` ascending for determinism.
pub fn all_time(posts: &[Post], votes: &[Vote]) -> Vec<LeaderboardEntry> {
    let visible = visible_posts(posts);

    let mut counts: HashMap<&str, u64> = HashMap::new();
    for vote in votes {
        if visible.contains(vote.post_id.as_str()) {
            *counts.entry(vote.post_id.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(post_id, count)| (post_id.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(LEADERBOARD_LIMIT);

    ranked
        .into_iter()
        .map(|(post_id, count)| LeaderboardEntry {
            post_id,
            total_votes: Some(count),
            score: None,
        })
        .collect()
}

/// Trending ranking: summed decay weight per non-deleted post, descending,
/// top 100. Same deterministic tie-break as all-time.
pub fn trending(posts: &[Post], votes: &[Vote], now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
    let visible = visible_posts(posts);

    let mut scores: HashMap<&str, f64> = HashMap::new();
    for vote in votes {
        if visible.contains(vote.post_id.as_str()) {
            *scores.entry(vote.post_id.as_str()).or_insert(0.0) +=
                decay_weight(vote.created_at, now);
        }
    }

    let mut ranked: Vec<(String, f64)> = scores
        .into_iter()
        .map(|(post_id, score)| (post_id.to_string(), score))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.truncate(LEADERBOARD_LIMIT);

    ranked
        .into_iter()
        .map(|(post_id, score)| LeaderboardEntry {
            post_id,
            total_votes: None,
            score: Some(score),
        })
        .collect()
}

fn visible_posts(posts: &[Post]) -> HashSet<&str> {
    posts
        .iter()
        .filter(|p| !p.deleted)
        .map(|p| p.id.as_str())
        .collect()
}

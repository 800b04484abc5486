//! Reminder Scheduler - Stale Contest Sweep
//!
//! Periodically finds non-deleted posts that are older than the
//! staleness window and still have no winner, and enqueues one
//! pick-winner reminder per post onto the external notification queue.
//!
//! The sweep is read-only with respect to the contest store and safe to
//! run concurrently with itself: delivery is at-least-once and consumers
//! dedup. Each queue push is an await point, so a cancelled caller stops
//! the sweep between posts; reminders already pushed stay pushed (the
//! operation is deliberately not transactional end-to-end).

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument};

use crate::domain::error::EngineError;
use crate::ports::contest_repository::ContestRepository;
use crate::ports::reminder_queue::{ReminderMessage, ReminderQueue};

/// Default staleness window: a day without a winner earns a reminder.
pub const DEFAULT_STALE_AFTER_HOURS: i64 = 24;

/// Result of one sweep.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    /// Number of reminders emitted.
    pub count: usize,
    /// The emitted reminders, in post order.
    pub reminders: Vec<ReminderMessage>,
}

/// Periodic sweep over stale unresolved contests.
pub struct ReminderScheduler<R: ContestRepository> {
    repo: Arc<R>,
    queue: Arc<dyn ReminderQueue>,
    stale_after: chrono::Duration,
}

impl<R: ContestRepository> ReminderScheduler<R> {
    /// Create a scheduler with the given staleness window.
    pub fn new(repo: Arc<R>, queue: Arc<dyn ReminderQueue>, stale_after_hours: i64) -> Self {
        Self {
            repo,
            queue,
            stale_after: chrono::Duration::hours(stale_after_hours),
        }
    }

    /// Run one sweep at `now`.
    ///
    /// Selects posts with `created_at < now − stale_after`, no winner,
    /// not deleted. Strict inequality: a post exactly at the boundary
    /// is not yet stale.
    #[instrument(skip(self))]
    pub async fn sweep(&self, now: DateTime<Utc>) -> Result<SweepReport, EngineError> {
        let threshold = now - self.stale_after;
        let posts = self.repo.list_posts(false).await?;

        let mut reminders = Vec::new();
        for post in posts {
            if !post.is_unresolved() || post.created_at >= threshold {
                continue;
            }
            let message = ReminderMessage::pick_winner(post.id.clone(), post.creator.clone(), now);
            self.queue.push(&message).await.map_err(EngineError::Internal)?;
            debug!(post_id = %post.id, "Pick-winner reminder enqueued");
            reminders.push(message);
        }

        info!(count = reminders.len(), "Reminder sweep complete");
        Ok(SweepReport {
            count: reminders.len(),
            reminders,
        })
    }

    /// Drive `sweep` on a fixed interval until shutdown.
    pub async fn run(&self, interval: Duration, mut shutdown_rx: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so startup is quiet.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Reminder scheduler received shutdown signal");
                    return;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.sweep(Utc::now()).await {
                        error!(error = %e, "Reminder sweep failed");
                    }
                }
            }
        }
    }
}

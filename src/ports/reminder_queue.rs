//! Reminder Queue Port - External Notification Queue Interface
//!
//! The reminder sweep pushes flat messages onto an external ordered
//! queue (FIFO consumption by the notification collaborator). Delivery
//! is at-least-once: re-running the sweep before consumers drain simply
//! re-enqueues, and consumers are expected to dedup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::address::Address;
use crate::domain::contest::PostId;

/// Message type tag for pick-winner reminders.
pub const REMINDER_PICK_WINNER: &str = "reminder_pick_winner";

/// A flat reminder message for one stale unresolved contest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderMessage {
    /// Message type tag (always `reminder_pick_winner`).
    #[serde(rename = "type")]
    pub kind: String,
    /// The stale post.
    pub post_id: PostId,
    /// Creator to notify.
    pub creator: Address,
    /// Sweep timestamp.
    pub due_at: DateTime<Utc>,
}

impl ReminderMessage {
    /// Build a pick-winner reminder.
    pub fn pick_winner(post_id: PostId, creator: Address, due_at: DateTime<Utc>) -> Self {
        Self {
            kind: REMINDER_PICK_WINNER.to_string(),
            post_id,
            creator,
            due_at,
        }
    }
}

/// Trait for notification queue providers.
#[async_trait]
pub trait ReminderQueue: Send + Sync + 'static {
    /// Append one message to the queue.
    async fn push(&self, message: &ReminderMessage) -> anyhow::Result<()>;
}

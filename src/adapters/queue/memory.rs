//! In-Memory Reminder Queue - FIFO Notification Adapter
//!
//! Append-only FIFO standing in for the external notification queue
//! (the production deployment points this at a Redis list). Delivery is
//! at-least-once: the sweep may re-enqueue a reminder before consumers
//! drain, and consumers dedup on (type, post_id).

use std::collections::VecDeque;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::ports::reminder_queue::{ReminderMessage, ReminderQueue};

/// FIFO queue of reminder messages.
#[derive(Default)]
pub struct InMemoryQueue {
    items: Mutex<VecDeque<ReminderMessage>>,
}

impl InMemoryQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest message, if any (consumer side).
    pub async fn pop(&self) -> Option<ReminderMessage> {
        self.items.lock().await.pop_front()
    }

    /// Number of queued messages.
    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    /// Whether the queue is empty.
    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }
}

#[async_trait]
impl ReminderQueue for InMemoryQueue {
    async fn push(&self, message: &ReminderMessage) -> Result<()> {
        let mut items = self.items.lock().await;
        items.push_back(message.clone());
        debug!(
            post_id = %message.post_id,
            queued = items.len(),
            "Reminder enqueued"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::address::Address;
    use chrono::Utc;

    #[tokio::test]
    async fn test_fifo_ordering() {
        let queue = InMemoryQueue::new();
        let creator = Address::parse("0x0000000000000000000000000000000000000001").unwrap();

        for i in 0..3 {
            let msg = ReminderMessage::pick_winner(format!("p{i}"), creator.clone(), Utc::now());
            queue.push(&msg).await.unwrap();
        }

        assert_eq!(queue.len().await, 3);
        assert_eq!(queue.pop().await.unwrap().post_id, "p0");
        assert_eq!(queue.pop().await.unwrap().post_id, "p1");
        assert_eq!(queue.pop().await.unwrap().post_id, "p2");
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn test_reenqueue_is_allowed() {
        let queue = InMemoryQueue::new();
        let creator = Address::parse("0x0000000000000000000000000000000000000001").unwrap();
        let msg = ReminderMessage::pick_winner("p".into(), creator, Utc::now());

        queue.push(&msg).await.unwrap();
        queue.push(&msg).await.unwrap();
        assert_eq!(queue.len().await, 2);
    }
}

//! Settlement Log Sink - Structured-Log Payout Handoff
//!
//! Default `SettlementSink`: serializes each committed winner decision
//! as a structured log line for the external payout collaborator to
//! pick up. Keeps the full record in memory as well so operators (and
//! tests) can inspect what was emitted.

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::settlement::SettlementRecord;
use crate::ports::settlement_sink::SettlementSink;

/// Logging sink that retains emitted records.
#[derive(Default)]
pub struct SettlementLog {
    records: Mutex<Vec<SettlementRecord>>,
}

impl SettlementLog {
    /// Create an empty settlement log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record emitted so far.
    pub async fn records(&self) -> Vec<SettlementRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl SettlementSink for SettlementLog {
    async fn publish(&self, record: &SettlementRecord) -> Result<()> {
        info!(
            post_id = %record.post_id,
            winner_suggestion_id = %record.winner_suggestion_id,
            winner_author = %record.winner_author,
            voters = record.voter_addresses.len(),
            payload = %serde_json::to_string(record)?,
            "Settlement record emitted"
        );
        self.records.lock().await.push(record.clone());
        Ok(())
    }
}

//! Settlement Sink Port - Payout Collaborator Boundary
//!
//! The winner resolver emits one settlement record per resolved contest.
//! Whatever consumes it (on-chain payout executor, audit log) lives
//! behind this trait; the engine itself never moves funds.

use async_trait::async_trait;

use crate::domain::settlement::SettlementRecord;

/// Trait for settlement record consumers.
#[async_trait]
pub trait SettlementSink: Send + Sync + 'static {
    /// Hand a committed winner decision to the payout collaborator.
    async fn publish(&self, record: &SettlementRecord) -> anyhow::Result<()>;
}

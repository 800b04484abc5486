//! Queue Adapters - Outbound Side Channels
//!
//! Implementations of the engine's outbound message boundaries:
//! - `InMemoryQueue`: FIFO reminder queue (external notification stand-in)
//! - `SettlementLog`: settlement-record sink for the payout collaborator

pub mod memory;
pub mod settlement_log;

pub use memory::InMemoryQueue;
pub use settlement_log::SettlementLog;

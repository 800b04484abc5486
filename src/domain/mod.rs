//! Domain layer - Core business logic and models.
//!
//! This module contains the pure contest domain logic for the engine.
//! No I/O allowed here (hexagonal architecture inner ring).
//! All types are serializable and testable in isolation.

pub mod address;
pub mod contest;
pub mod error;
pub mod leaderboard;
pub mod settlement;

// Re-export core types for convenience
pub use address::Address;
pub use contest::{Post, PostId, Suggestion, SuggestionId, Vote, VoteId};
pub use error::EngineError;
pub use leaderboard::LeaderboardEntry;
pub use settlement::{SettlementRecord, SplitRatios};

//! Settlement record — the payout decision handed to the external
//! escrow collaborator.
//!
//! The engine only records *who* wins and how the prize splits; actual
//! fund movement happens on-chain, outside this process. The split is
//! fixed at 50% winner / 30% voters-of-winner / 20% platform.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::address::Address;
use super::contest::{PostId, SuggestionId};

/// Fixed three-way prize split ratios. Always sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitRatios {
    /// Share for the winning suggestion's author.
    pub winner: Decimal,
    /// Share divided among voters of the winning suggestion.
    pub voters: Decimal,
    /// Platform fee share.
    pub platform: Decimal,
}

impl SplitRatios {
    /// The canonical 50/30/20 split.
    pub fn standard() -> Self {
        Self {
            winner: dec!(0.5),
            voters: dec!(0.3),
            platform: dec!(0.2),
        }
    }

    /// Sum of all shares. Must equal 1 for a valid split.
    pub fn total(&self) -> Decimal {
        self.winner + self.voters + self.platform
    }
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self::standard()
    }
}

/// The committed winner decision for one contest.
///
/// Consumed by the external payout mechanism; the engine never moves funds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRecord {
    /// Settled contest.
    pub post_id: PostId,
    /// Winning suggestion.
    pub winner_suggestion_id: SuggestionId,
    /// Author of the winning suggestion (receives the winner share).
    pub winner_author: Address,
    /// Addresses that voted for the winning suggestion (share the voter
    /// pool). Unique by construction: one vote per (voter, post).
    pub voter_addresses: Vec<Address>,
    /// Prize split ratios.
    pub split: SplitRatios,
}

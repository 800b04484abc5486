//! Property tests for the pure domain core: address parsing, input
//! validation, and the leaderboard scoring math.

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal_macros::dec;

use namethat_engine::domain::address::Address;
use namethat_engine::domain::contest::{
    self, Post, Vote, TITLE_MAX_CHARS, new_id,
};
use namethat_engine::domain::leaderboard::{self, LEADERBOARD_LIMIT};

fn hex_address() -> impl Strategy<Value = String> {
    proptest::string::string_regex("0x[0-9a-fA-F]{40}").unwrap()
}

fn addr(n: u64) -> Address {
    Address::parse(&format!("0x{n:040x}")).unwrap()
}

fn post(id: &str, deleted: bool) -> Post {
    Post {
        id: id.to_string(),
        creator: addr(1),
        title: "t".into(),
        description: "d".into(),
        image_url: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        prize_amount: dec!(0.01),
        fiat_value_at_creation: dec!(30),
        winner_suggestion_id: None,
        deleted,
    }
}

fn vote(post_id: &str, voter: u64, hours_ago: i64) -> Vote {
    Vote {
        id: new_id(),
        post_id: post_id.to_string(),
        suggestion_id: "s".into(),
        voter: addr(voter),
        created_at: Utc::now() - ChronoDuration::hours(hours_ago),
    }
}

proptest! {
    #[test]
    fn any_canonical_hex_address_parses(raw in hex_address()) {
        let parsed = Address::parse(&raw).unwrap();
        // Normalized form is lowercase and parses back to itself.
        let display = parsed.to_string();
        prop_assert_eq!(&display, &raw.to_lowercase());
        prop_assert_eq!(Address::parse(&display).unwrap(), parsed);
    }

    #[test]
    fn case_variants_are_the_same_address(raw in hex_address()) {
        let lower = Address::parse(&raw.to_lowercase()).unwrap();
        let upper = Address::parse(&raw.to_uppercase().replacen("0X", "0x", 1)).unwrap();
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn wrong_length_hex_is_rejected(len in 0usize..60) {
        prop_assume!(len != 40);
        let raw = format!("0x{}", "a".repeat(len));
        prop_assert!(Address::parse(&raw).is_err());
    }

    #[test]
    fn decay_weight_is_bounded_and_monotonic(
        age_a in 0i64..100_000,
        age_b in 0i64..100_000,
    ) {
        let now = Utc::now();
        let w_a = leaderboard::decay_weight(now - ChronoDuration::minutes(age_a), now);
        let w_b = leaderboard::decay_weight(now - ChronoDuration::minutes(age_b), now);

        prop_assert!(w_a > 0.0 && w_a <= 1.0);
        if age_a < age_b {
            prop_assert!(w_a >= w_b);
        }
    }

    #[test]
    fn all_time_counts_are_sorted_and_tiebroken(
        counts in proptest::collection::vec(1u8..20, 1..12)
    ) {
        let posts: Vec<Post> = (0..counts.len())
            .map(|i| post(&format!("p{i:02}"), false))
            .collect();
        let mut votes = Vec::new();
        let mut voter = 0u64;
        for (i, &n) in counts.iter().enumerate() {
            for _ in 0..n {
                voter += 1;
                votes.push(vote(&format!("p{i:02}"), voter, 1));
            }
        }

        let board = leaderboard::all_time(&posts, &votes);
        prop_assert_eq!(board.len(), posts.len().min(LEADERBOARD_LIMIT));
        for pair in board.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.total_votes >= b.total_votes);
            if a.total_votes == b.total_votes {
                prop_assert!(a.post_id < b.post_id);
            }
        }
    }

    #[test]
    fn deleted_posts_never_rank(deleted_idx in 0usize..4) {
        let posts: Vec<Post> = (0..4)
            .map(|i| post(&format!("p{i}"), i == deleted_idx))
            .collect();
        let votes: Vec<Vote> = (0..4).map(|i| vote(&format!("p{i}"), i as u64 + 1, 1)).collect();

        let board = leaderboard::all_time(&posts, &votes);
        prop_assert_eq!(board.len(), 3);
        let deleted_id = format!("p{deleted_idx}");
        prop_assert!(board.iter().all(|e| e.post_id != deleted_id));
    }

    #[test]
    fn title_validation_honors_char_limit(pad in 0usize..50) {
        let title = "x".repeat(TITLE_MAX_CHARS + pad);
        let result = contest::validate_title(&title);
        if pad == 0 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn whitespace_only_titles_are_rejected(spaces in 1usize..10) {
        prop_assert!(contest::validate_title(&" ".repeat(spaces)).is_err());
    }
}

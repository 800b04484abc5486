//! Leaderboard recomputation benchmarks.
//!
//! The boards are recomputed from the full vote table on every query,
//! so scoring cost per (posts × votes) is the number that matters.

use std::hint::black_box;

use chrono::{Duration, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use namethat_engine::domain::address::Address;
use namethat_engine::domain::contest::{Post, Vote, new_id};
use namethat_engine::domain::leaderboard;

fn addr(n: u64) -> Address {
    Address::parse(&format!("0x{n:040x}")).unwrap()
}

fn fixture(num_posts: usize, votes_per_post: usize) -> (Vec<Post>, Vec<Vote>) {
    let now = Utc::now();
    let posts: Vec<Post> = (0..num_posts)
        .map(|i| Post {
            id: format!("post-{i:05}"),
            creator: addr(1),
            title: "bench".into(),
            description: "bench".into(),
            image_url: None,
            created_at: now - Duration::days(3),
            prize_amount: dec!(0.01),
            fiat_value_at_creation: dec!(30),
            winner_suggestion_id: None,
            deleted: i % 10 == 0,
        })
        .collect();

    let mut votes = Vec::with_capacity(num_posts * votes_per_post);
    let mut voter = 0u64;
    for post in &posts {
        for j in 0..votes_per_post {
            voter += 1;
            votes.push(Vote {
                id: new_id(),
                post_id: post.id.clone(),
                suggestion_id: new_id(),
                voter: addr(voter),
                created_at: now - Duration::minutes((j as i64) * 17),
            });
        }
    }
    (posts, votes)
}

fn bench_all_time(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_time");
    for (num_posts, votes_per_post) in [(100, 10), (500, 20), (1000, 50)] {
        let (posts, votes) = fixture(num_posts, votes_per_post);
        group.bench_function(format!("{num_posts}p_{votes_per_post}v"), |b| {
            b.iter(|| leaderboard::all_time(black_box(&posts), black_box(&votes)));
        });
    }
    group.finish();
}

fn bench_trending(c: &mut Criterion) {
    let now = Utc::now();
    let mut group = c.benchmark_group("trending");
    for (num_posts, votes_per_post) in [(100, 10), (500, 20), (1000, 50)] {
        let (posts, votes) = fixture(num_posts, votes_per_post);
        group.bench_function(format!("{num_posts}p_{votes_per_post}v"), |b| {
            b.iter(|| {
                leaderboard::trending(black_box(&posts), black_box(&votes), black_box(now))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_all_time, bench_trending);
criterion_main!(benches);

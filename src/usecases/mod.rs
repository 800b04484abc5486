//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement
//! the engine's core workflows. Each use case is a self-contained
//! business operation.
//!
//! Use cases:
//! - `ContestService`: Post/suggestion/vote lifecycle + leaderboards
//! - `WinnerResolver`: One-way winner commitment + settlement emission
//! - `ReminderScheduler`: Stale-contest sweep into the notification queue

pub mod contest_service;
pub mod reminder_scheduler;
pub mod winner_resolver;

pub use contest_service::{ContestService, CreatePostRequest, LeaderboardMode};
pub use reminder_scheduler::{ReminderScheduler, SweepReport};
pub use winner_resolver::WinnerResolver;

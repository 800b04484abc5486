//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the domain/usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `ContestRepository`: Transactional contest store with atomic invariants
//! - `RateProvider`: Asset-to-fiat exchange rate source
//! - `ReminderQueue`: External FIFO notification queue
//! - `SettlementSink`: External payout collaborator boundary
//! - `Clock`: Injectable time source

pub mod clock;
pub mod contest_repository;
pub mod rate_provider;
pub mod reminder_queue;
pub mod settlement_sink;

//! Persistence Adapters - Contest Store Implementations
//!
//! Concrete implementations of the `ContestRepository` port. The engine
//! treats storage as an abstract transactional store; this crate ships
//! the in-memory reference adapter. A relational adapter would map the
//! vote-uniqueness and set-winner-if-unset primitives to a unique index
//! and a conditional UPDATE respectively.

pub mod memory;

pub use memory::InMemoryStore;

//! Clock Port - Injectable Time Source
//!
//! The oracle cache's TTL logic and the reminder scheduler's staleness
//! window both depend on wall-clock time. Hiding `Utc::now()` behind a
//! trait lets tests drive time explicitly instead of sleeping.

use chrono::{DateTime, Utc};

/// Trait for time providers.
pub trait Clock: Send + Sync + 'static {
    /// Current wall-clock time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

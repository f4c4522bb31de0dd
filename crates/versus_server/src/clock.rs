//! Timestamp source.

use chrono::{NaiveDateTime, Utc};

/// Supplies creation timestamps for games and moves.
pub trait Clock: Send + Sync {
    /// Current UTC time.
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

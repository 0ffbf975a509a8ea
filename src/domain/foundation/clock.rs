//! Clock abstraction.
//!
//! Derived attributes (age) and repository timestamps read the time through
//! an injected [`Clock`] rather than calling `Utc::now()` directly, so tests
//! can pin the evaluation date.

use std::fmt;
use std::sync::RwLock;

use chrono::{NaiveDate, TimeZone, Utc};

use super::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current instant.
    fn now(&self) -> Timestamp;

    /// Returns the current calendar date (UTC).
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// System clock backed by the real wall time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Manually driven clock for tests.
///
/// Returns the same instant until it is moved with [`ManualClock::set`] or
/// [`ManualClock::advance_secs`].
#[derive(Debug)]
pub struct ManualClock {
    current: RwLock<Timestamp>,
}

impl ManualClock {
    /// Creates a clock pinned to the given instant.
    pub fn new(at: Timestamp) -> Self {
        Self {
            current: RwLock::new(at),
        }
    }

    /// Creates a clock pinned to midday UTC of the given date.
    pub fn on_date(date: NaiveDate) -> Self {
        let midday = date
            .and_hms_opt(12, 0, 0)
            .map(|dt| Utc.from_utc_datetime(&dt))
            .unwrap_or_else(Utc::now);
        Self::new(Timestamp::from_datetime(midday))
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, at: Timestamp) {
        *self.write() = at;
    }

    /// Moves the clock forward.
    pub fn advance_secs(&self, secs: i64) {
        let mut current = self.write();
        *current = current.plus_secs(secs);
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Timestamp> {
        self.current.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

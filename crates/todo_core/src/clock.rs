//! Wall-clock time source consumed by the store.
//!
//! # Responsibility
//! - Supply "now" for `createdAt`/`updatedAt` stamps.
//! - Supply "today" for calendar-day comparisons in due-date views.
//!
//! # Invariants
//! - `today()` is derived from the same instant as `now()`.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use std::cell::Cell;

/// Time source abstraction injected into `TodoStore`.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day in the user's local time zone.
    fn today(&self) -> NaiveDate {
        self.now().with_timezone(&Local).date_naive()
    }
}

/// System clock backed by `Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for deterministic callers and tests.
///
/// `today()` uses the UTC calendar day so results do not depend on the
/// host time zone.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    /// Moves the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        self.now.set(self.now.get() + step);
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    fn today(&self) -> NaiveDate {
        self.now.get().date_naive()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }

    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

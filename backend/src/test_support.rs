//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

/// Clock pinned to a fixed instant.
///
/// # Examples
///
/// ```rust
/// use fee_ledger::test_support::{FixtureClock, fixture_timestamp};
/// use mockable::Clock;
///
/// let clock = FixtureClock::at(fixture_timestamp());
/// assert_eq!(clock.utc(), fixture_timestamp());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    /// Pin the clock to `utc_now`.
    #[must_use]
    pub const fn at(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Reference instant used across tests: 2024-06-01T00:00:00Z.
#[must_use]
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

//! Inclusive calendar-day ranges for transaction queries.

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};

/// Errors raised when building a [`TransactionDateRange`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    /// `end` falls before `start`.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        /// Requested first day.
        start: NaiveDate,
        /// Requested last day.
        end: NaiveDate,
    },
    /// The day after `end` is not representable.
    #[error("end date {end} is out of range")]
    OutOfRange {
        /// Requested last day.
        end: NaiveDate,
    },
}

/// Whole UTC days from `start` through `end`, both inclusive.
///
/// Internally the range is the half-open interval
/// `[start 00:00:00Z, end + 1 day 00:00:00Z)`.
///
/// # Examples
/// ```
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use fee_ledger::domain::TransactionDateRange;
///
/// let day = |d| NaiveDate::from_ymd_opt(2023, 1, d).expect("valid date");
/// let range = TransactionDateRange::new(day(1), day(31)).expect("valid range");
/// let late = Utc.with_ymd_and_hms(2023, 1, 31, 23, 59, 59).single().expect("valid");
/// assert!(range.contains(late));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionDateRange {
    start: NaiveDate,
    end: NaiveDate,
    start_at: DateTime<Utc>,
    end_before: DateTime<Utc>,
}

impl TransactionDateRange {
    /// Build a range covering `start` through `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if end < start {
            return Err(DateRangeError::EndBeforeStart { start, end });
        }
        let day_after = end
            .checked_add_days(Days::new(1))
            .ok_or(DateRangeError::OutOfRange { end })?;
        Ok(Self {
            start,
            end,
            start_at: midnight(start),
            end_before: midnight(day_after),
        })
    }

    /// First day in the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day in the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive lower instant.
    #[must_use]
    pub const fn start_at(&self) -> DateTime<Utc> {
        self.start_at
    }

    /// Exclusive upper instant.
    #[must_use]
    pub const fn end_before(&self) -> DateTime<Utc> {
        self.end_before
    }

    /// Whether `at` falls inside the range.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start_at && at < self.end_before
    }
}

impl Default for TransactionDateRange {
    /// Calendar year 2023.
    fn default() -> Self {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap_or(NaiveDate::MIN);
        let day_after = end.succ_opt().unwrap_or(end);
        Self {
            start,
            end,
            start_at: midnight(start),
            end_before: midnight(day_after),
        }
    }
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

//! Per-member fee totals over a trailing window.
//!
//! The window is anchored at `now` and excludes its lower bound: a fee
//! recorded exactly `months` calendar months before `now` does not count.

use std::collections::BTreeMap;

use chrono::{DateTime, Months, Utc};

use super::{BorrowFee, Member, MemberId, Username};

/// Default trailing window length in calendar months.
pub const DEFAULT_WINDOW_MONTHS: u32 = 12;

/// Aggregated fees for one member.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberTotal {
    /// Member identifier.
    pub member_id: MemberId,
    /// Username at query time.
    pub username: Username,
    /// Member creation instant.
    pub member_created_at: DateTime<Utc>,
    /// Sum of qualifying fees.
    pub total_fee: f64,
}

/// Trailing window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingWindow {
    months: u32,
}

impl Default for TrailingWindow {
    fn default() -> Self {
        Self::months(DEFAULT_WINDOW_MONTHS)
    }
}

impl TrailingWindow {
    /// A window spanning `months` calendar months.
    #[must_use]
    pub const fn months(months: u32) -> Self {
        Self { months }
    }

    /// Window length in months.
    #[must_use]
    pub const fn length_months(self) -> u32 {
        self.months
    }

    /// Lower bound of the window ending at `now`.
    ///
    /// Falls back to the minimum representable instant when the subtraction
    /// would underflow, which makes every fee qualify.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use fee_ledger::domain::TrailingWindow;
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    /// let start = TrailingWindow::default().start_at(now);
    /// assert_eq!(start.instant(), Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap());
    /// ```
    #[must_use]
    pub fn start_at(self, now: DateTime<Utc>) -> WindowStart {
        let instant = now
            .checked_sub_months(Months::new(self.months))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        WindowStart(instant)
    }
}

/// Exclusive lower bound of a totals window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WindowStart(DateTime<Utc>);

impl WindowStart {
    /// Wrap an explicit lower bound.
    #[must_use]
    pub const fn new(instant: DateTime<Utc>) -> Self {
        Self(instant)
    }

    /// The bound itself.
    #[must_use]
    pub const fn instant(self) -> DateTime<Utc> {
        self.0
    }

    /// Whether a fee recorded at `at` falls inside the window.
    #[must_use]
    pub fn includes(self, at: DateTime<Utc>) -> bool {
        at > self.0
    }
}

/// Roll fees up into per-member totals.
///
/// Only members with at least one fee inside the window appear. Fees whose
/// member is absent from `members` are ignored. Output is ordered by member
/// identifier.
#[must_use]
pub fn aggregate_member_totals(
    members: &[Member],
    fees: &[BorrowFee],
    window_start: WindowStart,
) -> Vec<MemberTotal> {
    let mut sums: BTreeMap<MemberId, f64> = BTreeMap::new();
    for fee in fees.iter().filter(|fee| window_start.includes(fee.created_at)) {
        *sums.entry(fee.member_id).or_insert(0.0) += fee.fee.get();
    }

    let mut totals: Vec<MemberTotal> = members
        .iter()
        .filter_map(|member| {
            sums.get(&member.id()).map(|total_fee| MemberTotal {
                member_id: member.id(),
                username: member.username().clone(),
                member_created_at: member.created_at(),
                total_fee: *total_fee,
            })
        })
        .collect();
    totals.sort_by_key(|total| total.member_id);
    totals
}

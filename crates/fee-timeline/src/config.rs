//! Generation parameters for fee timelines.

use chrono::{DateTime, Months, Utc};

use crate::error::GenerationError;

/// Default upper bound, in seconds, for the gap between a member's transactions.
pub const DEFAULT_MAX_GAP_SECONDS: u32 = 7200;

/// Default number of calendar months before "now" where histories start.
pub const DEFAULT_FLOOR_MONTHS: u32 = 18;

const DEFAULT_FEE_MIN: f64 = 0.0;
const DEFAULT_FEE_MAX: f64 = 10_000.0;

/// Half-open range `[min, max)` fees are drawn from uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeRange {
    min: f64,
    max: f64,
}

impl FeeRange {
    /// Build a fee range, rejecting empty, negative, or non-finite bounds.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidFeeRange`] when `min` is negative,
    /// either bound is not finite, or `min >= max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fee_timeline::FeeRange;
    ///
    /// assert!(FeeRange::new(0.0, 50.0).is_ok());
    /// assert!(FeeRange::new(10.0, 10.0).is_err());
    /// ```
    pub fn new(min: f64, max: f64) -> Result<Self, GenerationError> {
        let valid = min.is_finite() && max.is_finite() && min >= 0.0 && min < max;
        if valid {
            Ok(Self { min, max })
        } else {
            Err(GenerationError::InvalidFeeRange { min, max })
        }
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }
}

impl Default for FeeRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_FEE_MIN,
            max: DEFAULT_FEE_MAX,
        }
    }
}

/// Earliest timestamp any member's history may start at.
///
/// A member created after the floor starts at its own creation time instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFloor {
    /// A number of calendar months before generation time.
    MonthsBeforeNow(u32),
    /// A fixed instant.
    Fixed(DateTime<Utc>),
}

impl HistoryFloor {
    /// Resolve the floor against the generation time.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::TimestampOutOfRange`] when subtracting the
    /// months leaves chrono's supported range, and
    /// [`GenerationError::FloorAfterNow`] for a fixed floor later than `now`.
    pub fn resolve(self, now: DateTime<Utc>) -> Result<DateTime<Utc>, GenerationError> {
        match self {
            Self::MonthsBeforeNow(months) => now
                .checked_sub_months(Months::new(months))
                .ok_or(GenerationError::TimestampOutOfRange {
                    what: "history floor",
                }),
            Self::Fixed(floor) if floor > now => {
                Err(GenerationError::FloorAfterNow { floor, now })
            }
            Self::Fixed(floor) => Ok(floor),
        }
    }
}

impl Default for HistoryFloor {
    fn default() -> Self {
        Self::MonthsBeforeNow(DEFAULT_FLOOR_MONTHS)
    }
}

/// How each transaction picks its member.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MemberSelection {
    /// Every member is equally likely.
    #[default]
    Uniform,
    /// One non-negative weight per member, in member-set order.
    Weighted(Vec<f64>),
}

/// Parameters for [`crate::generate_fee_history`].
///
/// # Examples
///
/// ```
/// use fee_timeline::{FeeRange, TimelineConfig};
///
/// let config = TimelineConfig::new(500)
///     .with_fee_range(FeeRange::new(1.0, 20.0).expect("valid range"))
///     .with_max_gap_seconds(60);
/// assert_eq!(config.transaction_count(), 500);
/// assert_eq!(config.max_gap_seconds(), 60);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineConfig {
    transaction_count: usize,
    fee_range: FeeRange,
    max_gap_seconds: u32,
    floor: HistoryFloor,
    selection: MemberSelection,
}

impl TimelineConfig {
    /// Configuration for `transaction_count` records with default distributions.
    #[must_use]
    pub fn new(transaction_count: usize) -> Self {
        Self {
            transaction_count,
            fee_range: FeeRange::default(),
            max_gap_seconds: DEFAULT_MAX_GAP_SECONDS,
            floor: HistoryFloor::default(),
            selection: MemberSelection::default(),
        }
    }

    /// Replace the fee range.
    #[must_use]
    pub const fn with_fee_range(mut self, fee_range: FeeRange) -> Self {
        self.fee_range = fee_range;
        self
    }

    /// Replace the maximum inter-transaction gap.
    #[must_use]
    pub const fn with_max_gap_seconds(mut self, max_gap_seconds: u32) -> Self {
        self.max_gap_seconds = max_gap_seconds;
        self
    }

    /// Replace the history floor.
    #[must_use]
    pub const fn with_floor(mut self, floor: HistoryFloor) -> Self {
        self.floor = floor;
        self
    }

    /// Replace the member selection strategy.
    #[must_use]
    pub fn with_selection(mut self, selection: MemberSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Number of records to generate.
    #[must_use]
    pub const fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    /// Fee range records draw from.
    #[must_use]
    pub const fn fee_range(&self) -> FeeRange {
        self.fee_range
    }

    /// Largest gap, in whole seconds, between a member's consecutive records.
    #[must_use]
    pub const fn max_gap_seconds(&self) -> u32 {
        self.max_gap_seconds
    }

    /// Earliest start for member histories.
    #[must_use]
    pub const fn floor(&self) -> HistoryFloor {
        self.floor
    }

    /// Member selection strategy.
    #[must_use]
    pub const fn selection(&self) -> &MemberSelection {
        &self.selection
    }
}

//! Borrow fee transactions.

use std::fmt;

use chrono::{DateTime, Utc};

use super::MemberId;

/// Validation errors raised while building fee values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BorrowFeeValidationError {
    /// Sequence ordinals start at one.
    #[error("sequence type must be at least 1")]
    InvalidSequence,
    /// Fee amounts are finite and non-negative.
    #[error("fee must be a finite, non-negative amount")]
    InvalidAmount,
}

/// Store-assigned fee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BorrowFeeId(i64);

impl BorrowFeeId {
    /// Wrap a store identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// One-based ordinal of a fee within its member's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceType(u32);

impl SequenceType {
    /// The first ordinal in every member's history.
    pub const FIRST: Self = Self(1);

    /// Validate a raw ordinal.
    pub const fn new(raw: u32) -> Result<Self, BorrowFeeValidationError> {
        if raw == 0 {
            return Err(BorrowFeeValidationError::InvalidSequence);
        }
        Ok(Self(raw))
    }

    /// Raw ordinal.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i32> for SequenceType {
    type Error = BorrowFeeValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        let raw = u32::try_from(value).map_err(|_| BorrowFeeValidationError::InvalidSequence)?;
        Self::new(raw)
    }
}

impl fmt::Display for SequenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Finite, non-negative fee amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FeeAmount(f64);

impl FeeAmount {
    /// Validate a raw amount.
    ///
    /// # Examples
    /// ```
    /// use fee_ledger::domain::FeeAmount;
    ///
    /// assert!(FeeAmount::new(12.5).is_ok());
    /// assert!(FeeAmount::new(-1.0).is_err());
    /// assert!(FeeAmount::new(f64::NAN).is_err());
    /// ```
    pub fn new(raw: f64) -> Result<Self, BorrowFeeValidationError> {
        if !raw.is_finite() || raw < 0.0 {
            return Err(BorrowFeeValidationError::InvalidAmount);
        }
        Ok(Self(raw))
    }

    /// Raw amount.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// A stored borrow fee.
#[derive(Debug, Clone, PartialEq)]
pub struct BorrowFee {
    /// Store-assigned identifier.
    pub id: BorrowFeeId,
    /// Member charged.
    pub member_id: MemberId,
    /// Ordinal within the member's history.
    pub sequence_type: SequenceType,
    /// Amount charged.
    pub fee: FeeAmount,
    /// Instant the fee was incurred.
    pub created_at: DateTime<Utc>,
}

/// Fee awaiting insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBorrowFee {
    /// Member charged; the store rejects unknown members.
    pub member_id: MemberId,
    /// Ordinal within the member's history.
    pub sequence_type: SequenceType,
    /// Amount charged.
    pub fee: FeeAmount,
    /// Instant the fee was incurred.
    pub created_at: DateTime<Utc>,
}

impl NewBorrowFee {
    /// Attach a store identifier.
    #[must_use]
    pub const fn stored(self, id: BorrowFeeId) -> BorrowFee {
        BorrowFee {
            id,
            member_id: self.member_id,
            sequence_type: self.sequence_type,
            fee: self.fee,
            created_at: self.created_at,
        }
    }
}

//! Driven port for borrow fee persistence and aggregation.
//!
//! Adapters own both the raw fee rows and the grouped totals query, so a
//! database adapter can push the aggregation into SQL.

use async_trait::async_trait;

use crate::domain::{
    BorrowFee, MemberId, MemberTotal, NewBorrowFee, TransactionDateRange, WindowStart,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by borrow fee repository adapters.
    pub enum BorrowFeeRepositoryError {
        /// The referenced member does not exist.
        UnknownMember { member_id: i64 } => "member {member_id} does not exist",
        /// The member already has a fee with this sequence ordinal.
        DuplicateSequence { member_id: i64, sequence_type: u32 } =>
            "member {member_id} already has a fee with sequence {sequence_type}",
        /// Repository connection could not be established.
        Connection { message: String } => "borrow fee repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "borrow fee repository query failed: {message}",
    }
}

/// Port for writing fees and reading them back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowFeeRepository: Send + Sync {
    /// Insert fees atomically: either every fee is stored or none is.
    ///
    /// Returned fees keep the input order.
    async fn insert_fees(
        &self,
        fees: &[NewBorrowFee],
    ) -> Result<Vec<BorrowFee>, BorrowFeeRepositoryError>;

    /// Per-member totals of fees recorded strictly after `window_start`.
    ///
    /// Members without a qualifying fee are omitted.
    async fn totals_since(
        &self,
        window_start: WindowStart,
    ) -> Result<Vec<MemberTotal>, BorrowFeeRepositoryError>;

    /// A member's fees inside `range`, ascending by sequence ordinal.
    async fn list_for_member(
        &self,
        member_id: MemberId,
        range: &TransactionDateRange,
    ) -> Result<Vec<BorrowFee>, BorrowFeeRepositoryError>;
}

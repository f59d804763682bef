//! Driving port for a member's raw transactions.

use async_trait::async_trait;

use crate::domain::{BorrowFee, Error, MemberId, TransactionDateRange};

/// Domain use-case port for listing a member's fees by date.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberTransactionsQuery: Send + Sync {
    /// Fees charged to `member_id` on the days covered by `range`.
    ///
    /// Fails with `not_found` when the member does not exist.
    async fn member_transactions(
        &self,
        member_id: MemberId,
        range: TransactionDateRange,
    ) -> Result<Vec<BorrowFee>, Error>;
}

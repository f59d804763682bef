//! Date-ranged transaction listing for a single member.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{BorrowFeeRepository, MemberRepository, MemberTransactionsQuery};
use crate::domain::repository_errors::{
    map_borrow_fee_repository_error, map_member_repository_error,
};
use crate::domain::{BorrowFee, Error, MemberId, TransactionDateRange};

/// Service listing a member's fees for a range of days.
#[derive(Clone)]
pub struct MemberTransactionsService<M, F> {
    members: Arc<M>,
    fees: Arc<F>,
}

impl<M, F> MemberTransactionsService<M, F> {
    /// Create a service over the member and fee stores.
    pub fn new(members: Arc<M>, fees: Arc<F>) -> Self {
        Self { members, fees }
    }
}

#[async_trait]
impl<M, F> MemberTransactionsQuery for MemberTransactionsService<M, F>
where
    M: MemberRepository,
    F: BorrowFeeRepository,
{
    async fn member_transactions(
        &self,
        member_id: MemberId,
        range: TransactionDateRange,
    ) -> Result<Vec<BorrowFee>, Error> {
        let member = self
            .members
            .find_by_id(member_id)
            .await
            .map_err(map_member_repository_error)?;
        if member.is_none() {
            return Err(Error::not_found(format!("member {member_id} not found")));
        }

        self.fees
            .list_for_member(member_id, &range)
            .await
            .map_err(map_borrow_fee_repository_error)
    }
}

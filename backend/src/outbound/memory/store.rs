//! `RwLock`-guarded member and fee tables.

use std::collections::{BTreeMap, HashSet};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{
    BorrowFeeRepository, BorrowFeeRepositoryError, MemberRepository, MemberRepositoryError,
};
use crate::domain::{
    BorrowFee, BorrowFeeId, Member, MemberId, MemberTotal, NewBorrowFee, NewMember,
    TransactionDateRange, Username, WindowStart, aggregate_member_totals,
};

#[derive(Debug, Default)]
struct Tables {
    members: BTreeMap<MemberId, Member>,
    fees: Vec<BorrowFee>,
    next_member_id: i64,
    next_fee_id: i64,
}

impl Tables {
    fn allocate_member_id(&mut self) -> Result<MemberId, MemberRepositoryError> {
        self.next_member_id = self
            .next_member_id
            .checked_add(1)
            .ok_or_else(|| MemberRepositoryError::query("member id sequence exhausted"))?;
        MemberId::new(self.next_member_id)
            .map_err(|err| MemberRepositoryError::query(err.to_string()))
    }

    fn validate_batch(&self, fees: &[NewBorrowFee]) -> Result<(), BorrowFeeRepositoryError> {
        let mut seen: HashSet<(MemberId, u32)> = self
            .fees
            .iter()
            .map(|fee| (fee.member_id, fee.sequence_type.get()))
            .collect();
        for fee in fees {
            if !self.members.contains_key(&fee.member_id) {
                return Err(BorrowFeeRepositoryError::unknown_member(fee.member_id.get()));
            }
            let sequence = fee.sequence_type.get();
            if !seen.insert((fee.member_id, sequence)) {
                return Err(BorrowFeeRepositoryError::duplicate_sequence(
                    fee.member_id.get(),
                    sequence,
                ));
            }
        }
        Ok(())
    }
}

/// Process-local store implementing [`MemberRepository`] and
/// [`BorrowFeeRepository`].
///
/// Identifiers start at 1 and increase monotonically, mirroring a database
/// sequence.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use fee_ledger::domain::ports::MemberRepository;
/// use fee_ledger::domain::{NewMember, Username};
/// use fee_ledger::outbound::memory::InMemoryStore;
///
/// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
/// let store = InMemoryStore::default();
/// let member = store
///     .create(&NewMember {
///         username: Username::new("ada").expect("valid username"),
///         created_at: Utc::now(),
///     })
///     .await
///     .expect("member stored");
/// assert_eq!(member.id().get(), 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

fn poisoned<T>(_: PoisonError<T>) -> String {
    "in-memory store lock poisoned".to_owned()
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn create(&self, member: &NewMember) -> Result<Member, MemberRepositoryError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|err| MemberRepositoryError::query(poisoned(err)))?;
        let id = tables.allocate_member_id()?;
        let stored = Member::new(id, member.username.clone(), member.created_at);
        tables.members.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, MemberRepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|err| MemberRepositoryError::query(poisoned(err)))?;
        Ok(tables.members.get(&id).cloned())
    }

    async fn update_username(
        &self,
        id: MemberId,
        username: &Username,
    ) -> Result<Option<Member>, MemberRepositoryError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|err| MemberRepositoryError::query(poisoned(err)))?;
        Ok(tables.members.get_mut(&id).map(|member| {
            *member = member.renamed(username.clone());
            member.clone()
        }))
    }
}

#[async_trait]
impl BorrowFeeRepository for InMemoryStore {
    async fn insert_fees(
        &self,
        fees: &[NewBorrowFee],
    ) -> Result<Vec<BorrowFee>, BorrowFeeRepositoryError> {
        let mut tables = self
            .tables
            .write()
            .map_err(|err| BorrowFeeRepositoryError::query(poisoned(err)))?;
        tables.validate_batch(fees)?;

        let mut stored = Vec::with_capacity(fees.len());
        for fee in fees {
            tables.next_fee_id = tables
                .next_fee_id
                .checked_add(1)
                .ok_or_else(|| BorrowFeeRepositoryError::query("fee id sequence exhausted"))?;
            stored.push(fee.clone().stored(BorrowFeeId::new(tables.next_fee_id)));
        }
        tables.fees.extend(stored.iter().cloned());
        Ok(stored)
    }

    async fn totals_since(
        &self,
        window_start: WindowStart,
    ) -> Result<Vec<MemberTotal>, BorrowFeeRepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|err| BorrowFeeRepositoryError::query(poisoned(err)))?;
        let members: Vec<Member> = tables.members.values().cloned().collect();
        Ok(aggregate_member_totals(&members, &tables.fees, window_start))
    }

    async fn list_for_member(
        &self,
        member_id: MemberId,
        range: &TransactionDateRange,
    ) -> Result<Vec<BorrowFee>, BorrowFeeRepositoryError> {
        let tables = self
            .tables
            .read()
            .map_err(|err| BorrowFeeRepositoryError::query(poisoned(err)))?;
        let mut fees: Vec<BorrowFee> = tables
            .fees
            .iter()
            .filter(|fee| fee.member_id == member_id && range.contains(fee.created_at))
            .cloned()
            .collect();
        fees.sort_by_key(|fee| fee.sequence_type);
        Ok(fees)
    }
}

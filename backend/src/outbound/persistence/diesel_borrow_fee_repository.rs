//! PostgreSQL-backed borrow fee repository.
//!
//! Fee batches are written inside one transaction after checking that every
//! referenced member exists and no `(member, sequence)` pair is taken. The
//! totals query groups in SQL with the same exclusive lower bound as
//! [`crate::domain::aggregate_member_totals`].

use std::collections::{BTreeSet, HashSet};

use async_trait::async_trait;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{BorrowFeeRepository, BorrowFeeRepositoryError};
use crate::domain::{
    BorrowFee, MemberId, MemberTotal, NewBorrowFee, TransactionDateRange, WindowStart,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{BorrowFeeRow, MemberTotalRow, NewBorrowFeeRow};
use super::pool::{DbPool, PoolError};
use super::schema::{borrow_fees, members};

/// Rows per `INSERT` statement, well below the Postgres bind limit.
const INSERT_CHUNK_ROWS: usize = 1_000;

/// Diesel implementation of [`BorrowFeeRepository`].
#[derive(Clone)]
pub struct DieselBorrowFeeRepository {
    pool: DbPool,
}

impl DieselBorrowFeeRepository {
    /// Create a repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside the insert transaction.
enum InsertFailure {
    Rejected(BorrowFeeRepositoryError),
    Diesel(DieselError),
}

impl From<DieselError> for InsertFailure {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

fn pool_error(error: PoolError) -> BorrowFeeRepositoryError {
    map_pool_error(error, BorrowFeeRepositoryError::connection)
}

fn diesel_error(error: DieselError) -> BorrowFeeRepositoryError {
    map_diesel_error(
        error,
        BorrowFeeRepositoryError::query,
        BorrowFeeRepositoryError::connection,
    )
}

fn insert_failure(error: InsertFailure, rows: &[NewBorrowFeeRow]) -> BorrowFeeRepositoryError {
    match error {
        InsertFailure::Rejected(rejection) => rejection,
        // A member deleted between the existence check and the insert.
        InsertFailure::Diesel(DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            _,
        )) => rows.first().map_or_else(
            || BorrowFeeRepositoryError::query("foreign key violation"),
            |row| BorrowFeeRepositoryError::unknown_member(row.member_id),
        ),
        InsertFailure::Diesel(other) => diesel_error(other),
    }
}

fn to_rows(fees: &[NewBorrowFee]) -> Result<Vec<NewBorrowFeeRow>, BorrowFeeRepositoryError> {
    let mut seen = HashSet::with_capacity(fees.len());
    fees.iter()
        .map(|fee| {
            let sequence = fee.sequence_type.get();
            if !seen.insert((fee.member_id, sequence)) {
                return Err(BorrowFeeRepositoryError::duplicate_sequence(
                    fee.member_id.get(),
                    sequence,
                ));
            }
            let sequence_type = i32::try_from(sequence).map_err(|_| {
                BorrowFeeRepositoryError::query(format!("sequence {sequence} exceeds INT4"))
            })?;
            Ok(NewBorrowFeeRow {
                member_id: fee.member_id.get(),
                sequence_type,
                fee: fee.fee.get(),
                created_at: fee.created_at,
            })
        })
        .collect()
}

fn to_fees(rows: Vec<BorrowFeeRow>) -> Result<Vec<BorrowFee>, BorrowFeeRepositoryError> {
    rows.into_iter()
        .map(|row| BorrowFee::try_from(row).map_err(BorrowFeeRepositoryError::query))
        .collect()
}

async fn check_batch(
    conn: &mut AsyncPgConnection,
    rows: &[NewBorrowFeeRow],
) -> Result<(), InsertFailure> {
    let member_ids: BTreeSet<i64> = rows.iter().map(|row| row.member_id).collect();
    let member_ids: Vec<i64> = member_ids.into_iter().collect();

    let existing: HashSet<i64> = members::table
        .filter(members::id.eq_any(&member_ids))
        .select(members::id)
        .load::<i64>(conn)
        .await?
        .into_iter()
        .collect();
    if let Some(missing) = member_ids.iter().find(|id| !existing.contains(id)) {
        return Err(InsertFailure::Rejected(
            BorrowFeeRepositoryError::unknown_member(*missing),
        ));
    }

    let taken: HashSet<(i64, i32)> = borrow_fees::table
        .filter(borrow_fees::member_id.eq_any(&member_ids))
        .select((borrow_fees::member_id, borrow_fees::sequence_type))
        .load::<(i64, i32)>(conn)
        .await?
        .into_iter()
        .collect();
    if let Some(clash) = rows
        .iter()
        .find(|row| taken.contains(&(row.member_id, row.sequence_type)))
    {
        return Err(InsertFailure::Rejected(
            BorrowFeeRepositoryError::duplicate_sequence(
                clash.member_id,
                clash.sequence_type.unsigned_abs(),
            ),
        ));
    }
    Ok(())
}

#[async_trait]
impl BorrowFeeRepository for DieselBorrowFeeRepository {
    async fn insert_fees(
        &self,
        fees: &[NewBorrowFee],
    ) -> Result<Vec<BorrowFee>, BorrowFeeRepositoryError> {
        if fees.is_empty() {
            return Ok(Vec::new());
        }
        let rows = to_rows(fees)?;
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let stored = conn
            .transaction(|conn| {
                let rows = &rows;
                async move {
                    check_batch(conn, rows).await?;
                    let mut stored = Vec::with_capacity(rows.len());
                    for chunk in rows.chunks(INSERT_CHUNK_ROWS) {
                        let inserted = diesel::insert_into(borrow_fees::table)
                            .values(chunk)
                            .returning(BorrowFeeRow::as_returning())
                            .get_results(conn)
                            .await?;
                        stored.extend(inserted);
                    }
                    Ok::<_, InsertFailure>(stored)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| insert_failure(err, &rows))?;

        to_fees(stored)
    }

    async fn totals_since(
        &self,
        window_start: WindowStart,
    ) -> Result<Vec<MemberTotal>, BorrowFeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<MemberTotalRow> = members::table
            .inner_join(borrow_fees::table)
            .filter(borrow_fees::created_at.gt(window_start.instant()))
            .group_by((members::id, members::username, members::created_at))
            .select((
                members::id,
                members::username,
                members::created_at,
                sum(borrow_fees::fee),
            ))
            .order(members::id.asc())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter()
            .map(|row| MemberTotal::try_from(row).map_err(BorrowFeeRepositoryError::query))
            .collect()
    }

    async fn list_for_member(
        &self,
        member_id: MemberId,
        range: &TransactionDateRange,
    ) -> Result<Vec<BorrowFee>, BorrowFeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows = borrow_fees::table
            .filter(borrow_fees::member_id.eq(member_id.get()))
            .filter(borrow_fees::created_at.ge(range.start_at()))
            .filter(borrow_fees::created_at.lt(range.end_before()))
            .order(borrow_fees::sequence_type.asc())
            .select(BorrowFeeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_fees(rows)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::{FeeAmount, SequenceType};

    fn fee(member_id: i64, sequence: u32) -> NewBorrowFee {
        NewBorrowFee {
            member_id: MemberId::new(member_id).expect("valid id"),
            sequence_type: SequenceType::new(sequence).expect("valid sequence"),
            fee: FeeAmount::new(1.0).expect("valid amount"),
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    #[rstest]
    fn rows_keep_input_order() {
        let rows = to_rows(&[fee(2, 1), fee(1, 1), fee(2, 2)]).expect("valid batch");
        let keys: Vec<(i64, i32)> = rows
            .iter()
            .map(|row| (row.member_id, row.sequence_type))
            .collect();
        assert_eq!(keys, vec![(2, 1), (1, 1), (2, 2)]);
    }

    #[rstest]
    fn duplicate_pairs_within_a_batch_are_rejected() {
        let error = to_rows(&[fee(2, 1), fee(2, 1)]).expect_err("duplicate");
        assert_eq!(
            error,
            BorrowFeeRepositoryError::duplicate_sequence(2_i64, 1_u32)
        );
    }

    #[rstest]
    fn sequences_beyond_int4_are_rejected() {
        let error = to_rows(&[fee(1, u32::MAX)]).expect_err("overflow");
        assert!(matches!(error, BorrowFeeRepositoryError::Query { .. }));
    }

    #[rstest]
    fn rejections_pass_through_unchanged() {
        let rows = to_rows(&[fee(4, 1)]).expect("valid batch");
        let mapped = insert_failure(
            InsertFailure::Rejected(BorrowFeeRepositoryError::unknown_member(4_i64)),
            &rows,
        );
        assert_eq!(mapped, BorrowFeeRepositoryError::unknown_member(4_i64));
    }
}

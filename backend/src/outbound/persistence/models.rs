//! Internal Diesel row structs.
//!
//! Never exposed outside the persistence adapter; conversions into domain
//! types re-validate every column.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    BorrowFee, BorrowFeeId, FeeAmount, Member, MemberId, MemberTotal, SequenceType, Username,
};

use super::schema::{borrow_fees, members};

/// Row read from `members`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MemberRow {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<MemberRow> for Member {
    type Error = String;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        let id = MemberId::new(row.id).map_err(|err| format!("member {}: {err}", row.id))?;
        let username = Username::new(row.username).map_err(|err| format!("member {id}: {err}"))?;
        Ok(Self::new(id, username, row.created_at))
    }
}

/// Insertable member.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = members)]
pub(crate) struct NewMemberRow<'a> {
    pub username: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row read from `borrow_fees`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = borrow_fees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct BorrowFeeRow {
    pub id: i64,
    pub member_id: i64,
    pub sequence_type: i32,
    pub fee: f64,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BorrowFeeRow> for BorrowFee {
    type Error = String;

    fn try_from(row: BorrowFeeRow) -> Result<Self, Self::Error> {
        let context = |err: &dyn std::fmt::Display| format!("borrow fee {}: {err}", row.id);
        Ok(Self {
            id: BorrowFeeId::new(row.id),
            member_id: MemberId::new(row.member_id).map_err(|err| context(&err))?,
            sequence_type: SequenceType::try_from(row.sequence_type).map_err(|err| context(&err))?,
            fee: FeeAmount::new(row.fee).map_err(|err| context(&err))?,
            created_at: row.created_at,
        })
    }
}

/// Insertable borrow fee.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = borrow_fees)]
pub(crate) struct NewBorrowFeeRow {
    pub member_id: i64,
    pub sequence_type: i32,
    pub fee: f64,
    pub created_at: DateTime<Utc>,
}

/// Grouped totals row: `(id, username, created_at, SUM(fee))`.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct MemberTotalRow {
    pub member_id: i64,
    pub username: String,
    pub member_created_at: DateTime<Utc>,
    pub total_fee: Option<f64>,
}

impl TryFrom<MemberTotalRow> for MemberTotal {
    type Error = String;

    fn try_from(row: MemberTotalRow) -> Result<Self, Self::Error> {
        let member_id =
            MemberId::new(row.member_id).map_err(|err| format!("member {}: {err}", row.member_id))?;
        let username =
            Username::new(row.username).map_err(|err| format!("member {member_id}: {err}"))?;
        Ok(Self {
            member_id,
            username,
            member_created_at: row.member_created_at,
            total_fee: row.total_fee.unwrap_or(0.0),
        })
    }
}

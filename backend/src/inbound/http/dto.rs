//! Request and response payloads for the member endpoints.
//!
//! Field names follow the established wire format (`create_time`,
//! `member_fk`, `type`, `borrow_fee`) rather than the domain names.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BorrowFee, Member, MemberTotal};

#[derive(Debug, Deserialize)]
pub(super) struct MemberPath {
    pub(super) id: String,
}

/// Query parameters for `GET /api/member/{id}/transactions`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TransactionsParams {
    /// First day, `YYYY-MM-DD`, inclusive. Defaults to `2023-01-01`.
    pub start: Option<String>,
    /// Last day, `YYYY-MM-DD`, inclusive. Defaults to `2023-12-31`.
    pub end: Option<String>,
}

/// Request payload for creating or renaming a member.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MemberRequest {
    #[schema(example = "ada", max_length = 64)]
    pub username: String,
}

/// A member as returned by `GET /api/member/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberResponse {
    pub id: i64,
    pub username: String,
    /// RFC 3339 creation time.
    pub create_time: String,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id().get(),
            username: member.username().to_string(),
            create_time: member.created_at().to_rfc3339(),
        }
    }
}

/// Trailing-window fee total for one member.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberTotalResponse {
    pub member_id: i64,
    pub username: String,
    /// RFC 3339 creation time of the member.
    pub create_time: String,
    pub total_fee: f64,
}

impl From<MemberTotal> for MemberTotalResponse {
    fn from(total: MemberTotal) -> Self {
        Self {
            member_id: total.member_id.get(),
            username: total.username.to_string(),
            create_time: total.member_created_at.to_rfc3339(),
            total_fee: total.total_fee,
        }
    }
}

/// One borrow fee transaction.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BorrowFeeResponse {
    pub id: i64,
    pub member_fk: i64,
    /// Per-member sequence number, starting at 1.
    #[serde(rename = "type")]
    pub sequence_type: u32,
    pub borrow_fee: f64,
    /// RFC 3339 transaction time.
    pub create_time: String,
}

impl From<BorrowFee> for BorrowFeeResponse {
    fn from(fee: BorrowFee) -> Self {
        Self {
            id: fee.id.get(),
            member_fk: fee.member_id.get(),
            sequence_type: fee.sequence_type.get(),
            borrow_fee: fee.fee.get(),
            create_time: fee.created_at.to_rfc3339(),
        }
    }
}

/// Acknowledgement body for member writes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SuccessResponse {
    #[schema(example = "Member created")]
    pub success: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<i64>,
}

impl SuccessResponse {
    pub(super) fn created(id: i64) -> Self {
        Self {
            success: "Member created".to_owned(),
            id: Some(id),
        }
    }

    pub(super) fn updated() -> Self {
        Self {
            success: "Member updated".to_owned(),
            id: None,
        }
    }
}

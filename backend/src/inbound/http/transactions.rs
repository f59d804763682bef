//! Member transaction listing.
//!
//! ```text
//! GET /api/member/{id}/transactions?start=2023-01-01&end=2023-01-31
//! ```

use actix_web::{get, web};

use crate::domain::TransactionDateRange;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{BorrowFeeResponse, MemberPath, TransactionsParams};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, date_range, parse_date_or, parse_member_id};

const ID_FIELD: FieldName = FieldName::new("id");
const START_FIELD: FieldName = FieldName::new("start");
const END_FIELD: FieldName = FieldName::new("end");

/// List a member's fees incurred on the given days, both inclusive.
///
/// Missing `start`/`end` fall back to calendar year 2023.
#[utoipa::path(
    get,
    path = "/api/member/{id}/transactions",
    params(
        ("id" = i64, Path, description = "Member identifier"),
        TransactionsParams
    ),
    responses(
        (status = 200, description = "Fees ordered by sequence", body = [BorrowFeeResponse]),
        (status = 400, description = "Invalid id or date range", body = ErrorSchema),
        (status = 404, description = "Member not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["members"],
    operation_id = "listMemberTransactions"
)]
#[get("/member/{id}/transactions")]
pub async fn list_member_transactions(
    state: web::Data<HttpState>,
    path: web::Path<MemberPath>,
    params: web::Query<TransactionsParams>,
) -> ApiResult<web::Json<Vec<BorrowFeeResponse>>> {
    let id = parse_member_id(&path.id, ID_FIELD)?;
    let defaults = TransactionDateRange::default();
    let start = parse_date_or(params.start.as_deref(), START_FIELD, defaults.start())?;
    let end = parse_date_or(params.end.as_deref(), END_FIELD, defaults.end())?;
    let range = date_range(start, end, END_FIELD)?;

    let fees = state.transactions.member_transactions(id, range).await?;
    Ok(web::Json(
        fees.into_iter().map(BorrowFeeResponse::from).collect(),
    ))
}

//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every member endpoint, the health probes and the
//! error schema mirrors from [`crate::inbound::http::schemas`]. Swagger UI
//! serves it in debug builds and `openapi-dump` prints it for tooling.

use utoipa::OpenApi;

use crate::inbound::http::dto::{
    BorrowFeeResponse, MemberRequest, MemberResponse, MemberTotalResponse, SuccessResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fee ledger API",
        description = "Members, trailing-window fee totals and borrow fee transactions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::members::list_member_totals,
        crate::inbound::http::members::get_member,
        crate::inbound::http::members::create_member,
        crate::inbound::http::members::update_member,
        crate::inbound::http::transactions::list_member_transactions,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        MemberRequest,
        MemberResponse,
        MemberTotalResponse,
        BorrowFeeResponse,
        SuccessResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "members", description = "Members and their borrow fees"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

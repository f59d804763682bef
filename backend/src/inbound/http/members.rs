//! Member API handlers.
//!
//! ```text
//! GET /api/members
//! GET /api/member/{id}
//! POST /api/member {"username":"ada"}
//! PUT /api/member/{id} {"username":"lovelace"}
//! ```

use actix_web::{HttpResponse, get, post, put, web};

use crate::domain::ports::MemberUpdate;
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{
    MemberPath, MemberRequest, MemberResponse, MemberTotalResponse, SuccessResponse,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_member_id, parse_username};

const ID_FIELD: FieldName = FieldName::new("id");
const USERNAME_FIELD: FieldName = FieldName::new("username");

/// List trailing-window fee totals for members with at least one fee.
#[utoipa::path(
    get,
    path = "/api/members",
    responses(
        (status = 200, description = "Member totals ordered by member id", body = [MemberTotalResponse]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["members"],
    operation_id = "listMemberTotals"
)]
#[get("/members")]
pub async fn list_member_totals(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<MemberTotalResponse>>> {
    let totals = state.totals.member_totals().await?;
    Ok(web::Json(
        totals.into_iter().map(MemberTotalResponse::from).collect(),
    ))
}

/// Fetch one member.
#[utoipa::path(
    get,
    path = "/api/member/{id}",
    params(("id" = i64, Path, description = "Member identifier")),
    responses(
        (status = 200, description = "Member", body = MemberResponse),
        (status = 400, description = "Invalid member id", body = ErrorSchema),
        (status = 404, description = "Member not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["members"],
    operation_id = "getMember"
)]
#[get("/member/{id}")]
pub async fn get_member(
    state: web::Data<HttpState>,
    path: web::Path<MemberPath>,
) -> ApiResult<web::Json<MemberResponse>> {
    let id = parse_member_id(&path.id, ID_FIELD)?;
    let member = state.members_query.get_member(id).await?;
    Ok(web::Json(member.into()))
}

/// Create a member stamped with the current time.
#[utoipa::path(
    post,
    path = "/api/member",
    request_body = MemberRequest,
    responses(
        (status = 201, description = "Member created", body = SuccessResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["members"],
    operation_id = "createMember"
)]
#[post("/member")]
pub async fn create_member(
    state: web::Data<HttpState>,
    payload: web::Json<MemberRequest>,
) -> ApiResult<HttpResponse> {
    let username = parse_username(payload.into_inner().username, USERNAME_FIELD)?;
    let member = state.members.create_member(username).await?;
    Ok(HttpResponse::Created().json(SuccessResponse::created(member.id().get())))
}

/// Rename a member. The creation time never changes.
#[utoipa::path(
    put,
    path = "/api/member/{id}",
    request_body = MemberRequest,
    params(("id" = i64, Path, description = "Member identifier")),
    responses(
        (status = 200, description = "Member updated", body = SuccessResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Member not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["members"],
    operation_id = "updateMember"
)]
#[put("/member/{id}")]
pub async fn update_member(
    state: web::Data<HttpState>,
    path: web::Path<MemberPath>,
    payload: web::Json<MemberRequest>,
) -> ApiResult<web::Json<SuccessResponse>> {
    let id = parse_member_id(&path.id, ID_FIELD)?;
    let username = parse_username(payload.into_inner().username, USERNAME_FIELD)?;
    state
        .members
        .update_member(id, MemberUpdate { username })
        .await?;
    Ok(web::Json(SuccessResponse::updated()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::{
        MockMemberTotalsQuery, MockMemberTransactionsQuery, MockMembersCommand, MockMembersQuery,
    };
    use crate::domain::{Error, Member, MemberId, MemberTotal, Username};

    fn member(id: i64, username: &str) -> Member {
        Member::new(
            MemberId::new(id).expect("valid id"),
            Username::new(username).expect("valid username"),
            Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0)
                .single()
                .expect("valid timestamp"),
        )
    }

    struct Ports {
        members: MockMembersCommand,
        members_query: MockMembersQuery,
        totals: MockMemberTotalsQuery,
    }

    impl Default for Ports {
        fn default() -> Self {
            Self {
                members: MockMembersCommand::new(),
                members_query: MockMembersQuery::new(),
                totals: MockMemberTotalsQuery::new(),
            }
        }
    }

    fn state(ports: Ports) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(ports.members),
            Arc::new(ports.members_query),
            Arc::new(ports.totals),
            Arc::new(MockMemberTransactionsQuery::new()),
        ))
    }

    async fn call(ports: Ports, request: actix_test::TestRequest) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new().app_data(state(ports)).service(
                web::scope("/api")
                    .service(list_member_totals)
                    .service(get_member)
                    .service(create_member)
                    .service(update_member),
            ),
        )
        .await;
        let res = actix_test::call_service(&app, request.to_request()).await;
        let status = res.status();
        let body = actix_test::read_body(res).await;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).expect("JSON body")
        };
        (status, value)
    }

    #[rstest]
    #[actix_web::test]
    async fn totals_use_the_wire_field_names() {
        let mut ports = Ports::default();
        ports.totals.expect_member_totals().times(1).returning(|| {
            let ada = member(1, "ada");
            Ok(vec![MemberTotal {
                member_id: ada.id(),
                username: ada.username().clone(),
                member_created_at: ada.created_at(),
                total_fee: 500.0,
            }])
        });

        let (status, body) = call(ports, actix_test::TestRequest::get().uri("/api/members")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["member_id"], 1);
        assert_eq!(body[0]["username"], "ada");
        assert_eq!(body[0]["total_fee"], 500.0);
        assert_eq!(body[0]["create_time"], "2022-01-01T00:00:00+00:00");
    }

    #[rstest]
    #[actix_web::test]
    async fn create_returns_201_with_the_new_id() {
        let mut ports = Ports::default();
        ports
            .members
            .expect_create_member()
            .withf(|username| username.as_ref() == "ada")
            .times(1)
            .returning(|_| Ok(member(7, "ada")));

        let request = actix_test::TestRequest::post()
            .uri("/api/member")
            .set_json(serde_json::json!({"username": " ada "}));
        let (status, body) = call(ports, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, serde_json::json!({"success": "Member created", "id": 7}));
    }

    #[rstest]
    #[actix_web::test]
    async fn blank_username_is_rejected_before_the_port() {
        let mut ports = Ports::default();
        ports.members.expect_create_member().never();

        let request = actix_test::TestRequest::post()
            .uri("/api/member")
            .set_json(serde_json::json!({"username": "  "}));
        let (status, body) = call(ports, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["field"], "username");
        assert_eq!(body["details"]["code"], "empty_username");
    }

    #[rstest]
    #[actix_web::test]
    async fn update_reports_success() {
        let mut ports = Ports::default();
        ports
            .members
            .expect_update_member()
            .withf(|id, update| id.get() == 3 && update.username.as_ref() == "grace")
            .times(1)
            .returning(|_, _| Ok(member(3, "grace")));

        let request = actix_test::TestRequest::put()
            .uri("/api/member/3")
            .set_json(serde_json::json!({"username": "grace"}));
        let (status, body) = call(ports, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"success": "Member updated"}));
    }

    #[rstest]
    #[actix_web::test]
    async fn update_of_missing_member_is_404() {
        let mut ports = Ports::default();
        ports
            .members
            .expect_update_member()
            .returning(|id, _| Err(Error::not_found(format!("member {id} not found"))));

        let request = actix_test::TestRequest::put()
            .uri("/api/member/99")
            .set_json(serde_json::json!({"username": "nobody"}));
        let (status, body) = call(ports, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[rstest]
    #[case("abc")]
    #[case("0")]
    #[actix_web::test]
    async fn malformed_ids_are_rejected(#[case] raw: &str) {
        let mut ports = Ports::default();
        ports.members_query.expect_get_member().never();

        let uri = format!("/api/member/{raw}");
        let (status, body) = call(ports, actix_test::TestRequest::get().uri(&uri)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["code"], "invalid_id");
    }

    #[rstest]
    #[actix_web::test]
    async fn get_member_returns_the_member() {
        let mut ports = Ports::default();
        ports
            .members_query
            .expect_get_member()
            .returning(|_| Ok(member(2, "grace")));

        let (status, body) =
            call(ports, actix_test::TestRequest::get().uri("/api/member/2")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 2);
        assert_eq!(body["username"], "grace");
    }
}

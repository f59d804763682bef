//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates, so each test file pulls
//! this module in with `mod support;` and uses the parts it needs.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, TimeZone, Utc};
use fee_ledger::Trace;
use fee_ledger::domain::ports::{BorrowFeeRepository, MemberRepository};
use fee_ledger::domain::{
    FeeAmount, Member, MemberId, MemberService, MemberTotalsService, MemberTransactionsService,
    NewBorrowFee, NewMember, SequenceType, Username,
};
use fee_ledger::inbound::http::configure_api;
use fee_ledger::inbound::http::state::HttpState;
use fee_ledger::outbound::memory::InMemoryStore;
use fee_ledger::test_support::FixtureClock;

/// UTC midnight on the given day.
pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// HTTP state over `store` with every service reading `clock`.
pub fn http_state(store: &Arc<InMemoryStore>, clock: FixtureClock) -> web::Data<HttpState> {
    let clock = Arc::new(clock);
    let members = Arc::new(MemberService::new(Arc::clone(store), clock.clone()));
    web::Data::new(HttpState::new(
        members.clone(),
        members,
        Arc::new(MemberTotalsService::new(Arc::clone(store), clock)),
        Arc::new(MemberTransactionsService::new(
            Arc::clone(store),
            Arc::clone(store),
        )),
    ))
}

/// Traced application serving the `/api` scope over `store`.
pub fn ledger_app(
    store: &Arc<InMemoryStore>,
    clock: FixtureClock,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(http_state(store, clock))
        .wrap(Trace)
        .configure(configure_api)
}

/// Store a member created at `created_at`.
pub async fn add_member(
    store: &InMemoryStore,
    username: &str,
    created_at: DateTime<Utc>,
) -> Member {
    store
        .create(&NewMember {
            username: Username::new(username).expect("valid username"),
            created_at,
        })
        .await
        .expect("member stored")
}

/// Store one fee for `member_id` under the given sequence number.
pub async fn add_fee(
    store: &InMemoryStore,
    member_id: MemberId,
    sequence: u32,
    amount: f64,
    created_at: DateTime<Utc>,
) {
    let fee = NewBorrowFee {
        member_id,
        sequence_type: SequenceType::new(sequence).expect("valid sequence"),
        fee: FeeAmount::new(amount).expect("valid amount"),
        created_at,
    };
    store.insert_fees(&[fee]).await.expect("fee stored");
}

/// Store fees for `member_id` with sequences numbered from 1.
pub async fn add_fees(store: &InMemoryStore, member_id: MemberId, fees: &[(f64, DateTime<Utc>)]) {
    for (&(amount, created_at), sequence) in fees.iter().zip(1_u32..) {
        add_fee(store, member_id, sequence, amount, created_at).await;
    }
}

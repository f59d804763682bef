//! Builders wiring repositories into services and HTTP state.

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use fee_ledger::domain::ports::{BorrowFeeRepository, MemberRepository};
use fee_ledger::domain::{
    MemberService, MemberTotalsService, MemberTransactionsService, TrailingWindow,
};
use fee_ledger::inbound::http::state::HttpState;
use fee_ledger::outbound::memory::InMemoryStore;
use fee_ledger::outbound::persistence::{DieselBorrowFeeRepository, DieselMemberRepository};
use fee_ledger::seeding::{SeedSettings, seed_fees_on_startup};

use super::ServerConfig;

/// Build the HTTP state over one member store and one fee store.
pub(super) fn build_http_state<M, F>(
    members: Arc<M>,
    fees: Arc<F>,
    window: TrailingWindow,
    clock: Arc<dyn Clock>,
) -> web::Data<HttpState>
where
    M: MemberRepository + 'static,
    F: BorrowFeeRepository + 'static,
{
    let member_service = Arc::new(MemberService::new(Arc::clone(&members), Arc::clone(&clock)));
    let totals = Arc::new(MemberTotalsService::with_window(
        Arc::clone(&fees),
        clock,
        window,
    ));
    let transactions = Arc::new(MemberTransactionsService::new(members, fees));
    web::Data::new(HttpState::new(
        member_service.clone(),
        member_service,
        totals,
        transactions,
    ))
}

async fn seed_then_build<M, F>(
    members: Arc<M>,
    fees: Arc<F>,
    config: &ServerConfig,
    seed_settings: &SeedSettings,
) -> io::Result<web::Data<HttpState>>
where
    M: MemberRepository + 'static,
    F: BorrowFeeRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    seed_fees_on_startup(
        seed_settings,
        Arc::clone(&members),
        Arc::clone(&fees),
        Arc::clone(&clock),
    )
    .await
    .map_err(|error| io::Error::other(format!("startup fee seeding failed: {error}")))?;
    Ok(build_http_state(members, fees, config.totals_window, clock))
}

/// Select the store for `config`, seed it if enabled and build the state.
pub(super) async fn build_state(
    config: &ServerConfig,
    seed_settings: &SeedSettings,
) -> io::Result<web::Data<HttpState>> {
    match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "member store selected");
            seed_then_build(
                Arc::new(DieselMemberRepository::new(pool.clone())),
                Arc::new(DieselBorrowFeeRepository::new(pool.clone())),
                config,
                seed_settings,
            )
            .await
        }
        None => {
            info!(store = "memory", "member store selected");
            let store = Arc::new(InMemoryStore::default());
            seed_then_build(Arc::clone(&store), store, config, seed_settings).await
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    use fee_ledger::inbound::http::configure_api;

    use super::*;

    fn seed_settings(enabled: bool) -> SeedSettings {
        SeedSettings {
            enabled,
            seed_name: Some("quiet-branch".to_owned()),
            registry_path: None,
            member_count: Some(4),
            transaction_count: Some(20),
        }
    }

    fn config() -> ServerConfig {
        ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)))
    }

    #[rstest]
    #[actix_web::test]
    async fn seeded_memory_store_serves_members() {
        let state = build_state(&config(), &seed_settings(true))
            .await
            .expect("state builds");
        let app = test::init_service(App::new().app_data(state).configure(configure_api)).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/member/4").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["id"], 4);
    }

    #[rstest]
    #[actix_web::test]
    async fn unseeded_memory_store_starts_empty() {
        let state = build_state(&config(), &seed_settings(false))
            .await
            .expect("state builds");
        let app = test::init_service(App::new().app_data(state).configure(configure_api)).await;

        let res =
            test::call_service(&app, test::TestRequest::get().uri("/api/members").to_request())
                .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!([]));
    }
}

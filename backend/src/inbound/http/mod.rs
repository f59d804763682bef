//! HTTP inbound adapter exposing the member REST endpoints.

pub mod dto;
pub mod error;
pub mod health;
pub mod members;
pub mod schemas;
pub mod state;
pub mod transactions;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api` scope with extractor error handling.
///
/// Callers supply [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use fee_ledger::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(error::json_config())
            .app_data(error::query_config())
            .app_data(error::path_config())
            .service(members::list_member_totals)
            .service(members::get_member)
            .service(members::create_member)
            .service(members::update_member)
            .service(transactions::list_member_transactions),
    );
}

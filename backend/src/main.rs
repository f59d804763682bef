//! Backend entry-point: loads settings, wires the store and serves the API.

mod server;

use std::ffi::OsString;
use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use fee_ledger::config::ServerSettings;
use fee_ledger::inbound::http::health::HealthState;
use fee_ledger::outbound::persistence::{DbPool, PoolConfig};
use fee_ledger::seeding::SeedSettings;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load()
        .map_err(|error| io::Error::other(format!("load server settings: {error}")))?;
    // Seed settings come from the environment only; CLI flags belong to the server.
    let seed_settings = SeedSettings::load_from_iter([OsString::from("fee-ledger")])
        .map_err(|error| io::Error::other(format!("load seed settings: {error}")))?;

    let mut config =
        ServerConfig::new(settings.bind_addr()).with_totals_window(settings.totals_window());
    match settings.database_url() {
        Some(url) => {
            let pool_config = PoolConfig::new(url).with_max_size(settings.pool_max_size());
            let pool = DbPool::new(pool_config)
                .await
                .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database URL configured; using the in-memory store"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, &seed_settings).await?;
    info!(bind_addr = %settings.bind_addr(), "fee ledger listening");
    server.await
}

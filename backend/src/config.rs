//! HTTP server settings loaded via OrthoConfig.
//!
//! Values come from `MEMBER_FEES_*` environment variables, CLI flags or a
//! configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{DEFAULT_WINDOW_MONTHS, TrailingWindow};
use crate::outbound::persistence::DEFAULT_MAX_SIZE;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings for the `fee-ledger` server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MEMBER_FEES")]
pub struct ServerSettings {
    /// Postgres connection URL. The in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// Trailing window for member totals, in calendar months.
    #[ortho_config(default = 12)]
    pub totals_window_months: u32,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
}

impl ServerSettings {
    /// Return the configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(default_bind_addr)
    }

    /// Return the totals window; a zero length falls back to the default.
    pub fn totals_window(&self) -> TrailingWindow {
        match self.totals_window_months {
            0 => TrailingWindow::months(DEFAULT_WINDOW_MONTHS),
            months => TrailingWindow::months(months),
        }
    }

    /// Return the pool size; zero falls back to the default.
    pub fn pool_max_size(&self) -> u32 {
        match self.pool_max_size {
            0 => DEFAULT_MAX_SIZE,
            size => size,
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    DEFAULT_BIND_ADDR
        .parse()
        .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8080)))
}

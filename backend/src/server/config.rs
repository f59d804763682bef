//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use fee_ledger::domain::TrailingWindow;
use fee_ledger::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) totals_window: TrailingWindow,
}

impl ServerConfig {
    /// Listen on `bind_addr` over the in-memory store and default window.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            totals_window: TrailingWindow::default(),
        }
    }

    /// Use Postgres repositories drawing from `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the trailing window used for member totals.
    #[must_use]
    pub fn with_totals_window(mut self, window: TrailingWindow) -> Self {
        self.totals_window = window;
        self
    }
}

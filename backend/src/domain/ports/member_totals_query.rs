//! Driving port for trailing-window fee totals.

use async_trait::async_trait;

use crate::domain::{Error, MemberTotal};

/// Domain use-case port for the member totals report.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberTotalsQuery: Send + Sync {
    /// Totals for every member with a fee inside the configured window
    /// ending now.
    async fn member_totals(&self) -> Result<Vec<MemberTotal>, Error>;
}

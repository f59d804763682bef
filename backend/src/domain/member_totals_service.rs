//! Trailing-window fee totals service.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{BorrowFeeRepository, MemberTotalsQuery};
use crate::domain::repository_errors::map_borrow_fee_repository_error;
use crate::domain::{Error, MemberTotal, TrailingWindow};

/// Service computing per-member totals over a window ending now.
///
/// `now` is read once per request from the injected clock; the window bound
/// is derived from it before the store is queried.
#[derive(Clone)]
pub struct MemberTotalsService<F> {
    fees: Arc<F>,
    clock: Arc<dyn Clock>,
    window: TrailingWindow,
}

impl<F> MemberTotalsService<F> {
    /// Create a service using the default one-year window.
    pub fn new(fees: Arc<F>, clock: Arc<dyn Clock>) -> Self {
        Self::with_window(fees, clock, TrailingWindow::default())
    }

    /// Create a service using an explicit window.
    pub fn with_window(fees: Arc<F>, clock: Arc<dyn Clock>, window: TrailingWindow) -> Self {
        Self {
            fees,
            clock,
            window,
        }
    }
}

#[async_trait]
impl<F> MemberTotalsQuery for MemberTotalsService<F>
where
    F: BorrowFeeRepository,
{
    async fn member_totals(&self) -> Result<Vec<MemberTotal>, Error> {
        let now = self.clock.utc();
        let window_start = self.window.start_at(now);
        debug!(
            %now,
            window_start = %window_start.instant(),
            window_months = self.window.length_months(),
            "computing member totals"
        );
        self.fees
            .totals_since(window_start)
            .await
            .map_err(map_borrow_fee_repository_error)
    }
}

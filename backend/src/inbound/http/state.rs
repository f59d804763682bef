//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be tested against any store without network I/O.

use std::sync::Arc;

use crate::domain::ports::{
    MemberTotalsQuery, MemberTransactionsQuery, MembersCommand, MembersQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub members: Arc<dyn MembersCommand>,
    pub members_query: Arc<dyn MembersQuery>,
    pub totals: Arc<dyn MemberTotalsQuery>,
    pub transactions: Arc<dyn MemberTransactionsQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use fee_ledger::domain::{MemberService, MemberTotalsService, MemberTransactionsService};
    /// use fee_ledger::inbound::http::state::HttpState;
    /// use fee_ledger::outbound::memory::InMemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let store = Arc::new(InMemoryStore::default());
    /// let members = Arc::new(MemberService::new(Arc::clone(&store), Arc::new(DefaultClock)));
    /// let state = HttpState::new(
    ///     members.clone(),
    ///     members,
    ///     Arc::new(MemberTotalsService::new(Arc::clone(&store), Arc::new(DefaultClock))),
    ///     Arc::new(MemberTransactionsService::new(Arc::clone(&store), store)),
    /// );
    /// let _query = state.members_query.clone();
    /// ```
    pub fn new(
        members: Arc<dyn MembersCommand>,
        members_query: Arc<dyn MembersQuery>,
        totals: Arc<dyn MemberTotalsQuery>,
        transactions: Arc<dyn MemberTransactionsQuery>,
    ) -> Self {
        Self {
            members,
            members_query,
            totals,
            transactions,
        }
    }
}

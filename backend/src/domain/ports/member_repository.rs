//! Driven port for member persistence.

use async_trait::async_trait;

use crate::domain::{Member, MemberId, NewMember, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by member repository adapters.
    pub enum MemberRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "member repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "member repository query failed: {message}",
    }
}

/// Port for storing and loading members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Insert a member; the adapter assigns its identifier.
    async fn create(&self, member: &NewMember) -> Result<Member, MemberRepositoryError>;

    /// Load a member by identifier.
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, MemberRepositoryError>;

    /// Replace a member's username, returning the updated member or `None`
    /// when it does not exist.
    async fn update_username(
        &self,
        id: MemberId,
        username: &Username,
    ) -> Result<Option<Member>, MemberRepositoryError>;
}

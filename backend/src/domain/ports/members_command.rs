//! Driving port for member mutations.

use async_trait::async_trait;

use crate::domain::{Error, Member, MemberId, Username};

/// Fields a caller may change on an existing member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberUpdate {
    /// Replacement username.
    pub username: Username,
}

/// Domain use-case port for creating and updating members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembersCommand: Send + Sync {
    /// Create a member stamped with the current time.
    async fn create_member(&self, username: Username) -> Result<Member, Error>;

    /// Apply `update` to an existing member.
    ///
    /// Returns [`crate::domain::ErrorCode::NotFound`] when the member is missing.
    async fn update_member(&self, id: MemberId, update: MemberUpdate) -> Result<Member, Error>;
}

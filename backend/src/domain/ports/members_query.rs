//! Driving port for member lookups.

use async_trait::async_trait;

use crate::domain::{Error, Member, MemberId};

/// Domain use-case port for reading a single member.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MembersQuery: Send + Sync {
    /// Fetch a member, failing with `not_found` when it does not exist.
    async fn get_member(&self, id: MemberId) -> Result<Member, Error>;
}

//! Member domain service implementing the member driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{MemberRepository, MemberUpdate, MembersCommand, MembersQuery};
use crate::domain::repository_errors::map_member_repository_error;
use crate::domain::{Error, Member, MemberId, NewMember, Username};

/// Service creating, renaming and reading members.
#[derive(Clone)]
pub struct MemberService<R> {
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> MemberService<R> {
    /// Create a service over `repo`, stamping new members with `clock`.
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }
}

fn member_not_found(id: MemberId) -> Error {
    Error::not_found(format!("member {id} not found"))
}

#[async_trait]
impl<R> MembersCommand for MemberService<R>
where
    R: MemberRepository,
{
    async fn create_member(&self, username: Username) -> Result<Member, Error> {
        let new_member = NewMember {
            username,
            created_at: self.clock.utc(),
        };
        let member = self
            .repo
            .create(&new_member)
            .await
            .map_err(map_member_repository_error)?;
        info!(member_id = member.id().get(), "member created");
        Ok(member)
    }

    async fn update_member(&self, id: MemberId, update: MemberUpdate) -> Result<Member, Error> {
        self.repo
            .update_username(id, &update.username)
            .await
            .map_err(map_member_repository_error)?
            .ok_or_else(|| member_not_found(id))
    }
}

#[async_trait]
impl<R> MembersQuery for MemberService<R>
where
    R: MemberRepository,
{
    async fn get_member(&self, id: MemberId) -> Result<Member, Error> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_member_repository_error)?
            .ok_or_else(|| member_not_found(id))
    }
}

//! PostgreSQL-backed member repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MemberRepository, MemberRepositoryError};
use crate::domain::{Member, MemberId, NewMember, Username};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{MemberRow, NewMemberRow};
use super::pool::{DbPool, PoolError};
use super::schema::members;

/// Diesel implementation of [`MemberRepository`].
#[derive(Clone)]
pub struct DieselMemberRepository {
    pool: DbPool,
}

impl DieselMemberRepository {
    /// Create a repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> MemberRepositoryError {
    map_pool_error(error, MemberRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> MemberRepositoryError {
    map_diesel_error(
        error,
        MemberRepositoryError::query,
        MemberRepositoryError::connection,
    )
}

fn to_member(row: MemberRow) -> Result<Member, MemberRepositoryError> {
    Member::try_from(row).map_err(MemberRepositoryError::query)
}

#[async_trait]
impl MemberRepository for DieselMemberRepository {
    async fn create(&self, member: &NewMember) -> Result<Member, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewMemberRow {
            username: member.username.as_ref(),
            created_at: member.created_at,
        };
        let stored = diesel::insert_into(members::table)
            .values(&row)
            .returning(MemberRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        to_member(stored)
    }

    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        members::table
            .find(id.get())
            .select(MemberRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_member)
            .transpose()
    }

    async fn update_username(
        &self,
        id: MemberId,
        username: &Username,
    ) -> Result<Option<Member>, MemberRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(members::table.find(id.get()))
            .set(members::username.eq(username.as_ref()))
            .returning(MemberRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(to_member)
            .transpose()
    }
}

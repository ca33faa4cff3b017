//! PostgreSQL implementation of MemberDirectory

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use ledger_core::entities::{Alliance, Member};
use ledger_core::traits::{MemberDirectory, RepoResult};
use ledger_core::value_objects::Snowflake;

use crate::models::{AllianceModel, MemberModel};

use super::error::map_db_error;

/// Reads members and alliances from the directory's tables
#[derive(Clone)]
pub struct PgMemberDirectory {
    pool: PgPool,
}

impl PgMemberDirectory {
    /// Create a new PgMemberDirectory
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberDirectory for PgMemberDirectory {
    #[instrument(skip(self))]
    async fn find_member(&self, id: Snowflake) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, name, governor_id, alliance_id, joined_at
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn find_alliance(&self, id: Snowflake) -> RepoResult<Option<Alliance>> {
        let result = sqlx::query_as::<_, AllianceModel>(
            r#"
            SELECT id, name, tag, leader_id, bank_name, description, created_at
            FROM alliances
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Alliance::from))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn find_members(&self, ids: &[Snowflake]) -> RepoResult<Vec<Member>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw_ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();
        let results = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, name, governor_id, alliance_id, joined_at
            FROM members
            WHERE id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(raw_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Member::from).collect())
    }
}

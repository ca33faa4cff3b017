//! PostgreSQL implementation of ContributionRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use ledger_core::engine::{CreateDecision, PeriodSequencer};
use ledger_core::entities::ContributionRecord;
use ledger_core::error::DomainError;
use ledger_core::traits::{ContributionFilter, ContributionRepository, RepoResult};
use ledger_core::value_objects::Snowflake;

use crate::mappers::{periods_from_rows, ContributionInsert};
use crate::models::ContributionModel;

use super::error::{contribution_not_found, map_db_error, map_unique_violation};

const SELECT_COLUMNS: &str = r#"
    SELECT id, member_id, alliance_id, period, food, wood, stone, gold,
           recorded_at, created_at, updated_at
    FROM contributions
"#;

/// PostgreSQL implementation of ContributionRepository
#[derive(Clone)]
pub struct PgContributionRepository {
    pool: PgPool,
}

impl PgContributionRepository {
    /// Create a new PgContributionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Read a member's periods inside an open transaction
    async fn periods_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        member_id: i64,
    ) -> Result<Vec<u32>, DomainError> {
        let rows = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT period FROM contributions WHERE member_id = $1 ORDER BY period
            "#,
        )
        .bind(member_id)
        .fetch_all(&mut **tx)
        .await
        .map_err(map_db_error)?;

        periods_from_rows(rows)
    }
}

fn into_records(models: Vec<ContributionModel>) -> RepoResult<Vec<ContributionRecord>> {
    models.into_iter().map(ContributionRecord::try_from).collect()
}

#[async_trait]
impl ContributionRepository for PgContributionRepository {
    #[instrument(skip(self))]
    async fn find(&self, member_id: Snowflake, period: u32) -> RepoResult<Option<ContributionRecord>> {
        let query = format!("{SELECT_COLUMNS} WHERE member_id = $1 AND period = $2");
        let result = sqlx::query_as::<_, ContributionModel>(&query)
            .bind(member_id.into_inner())
            .bind(i64::from(period))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        result.map(ContributionRecord::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, member_id: Snowflake) -> RepoResult<Vec<ContributionRecord>> {
        let query = format!("{SELECT_COLUMNS} WHERE member_id = $1 ORDER BY period");
        let results = sqlx::query_as::<_, ContributionModel>(&query)
            .bind(member_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_records(results)
    }

    #[instrument(skip(self))]
    async fn find_by_alliance(
        &self,
        alliance_id: Snowflake,
        filter: &ContributionFilter,
    ) -> RepoResult<Vec<ContributionRecord>> {
        let query = format!(
            r#"{SELECT_COLUMNS}
            WHERE alliance_id = $1
              AND ($2::BIGINT IS NULL OR member_id = $2)
              AND ($3::BIGINT IS NULL OR period >= $3)
              AND ($4::BIGINT IS NULL OR period <= $4)
              AND ($5::DATE IS NULL OR recorded_at >= $5)
              AND ($6::DATE IS NULL OR recorded_at <= $6)
            ORDER BY member_id, period
            "#
        );
        let results = sqlx::query_as::<_, ContributionModel>(&query)
            .bind(alliance_id.into_inner())
            .bind(filter.member_id.map(Snowflake::into_inner))
            .bind(filter.period_from.map(i64::from))
            .bind(filter.period_to.map(i64::from))
            .bind(filter.recorded_from)
            .bind(filter.recorded_to)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        into_records(results)
    }

    #[instrument(skip(self))]
    async fn recorded_periods(&self, member_id: Snowflake) -> RepoResult<Vec<u32>> {
        let rows = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT period FROM contributions WHERE member_id = $1 ORDER BY period
            "#,
        )
        .bind(member_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        periods_from_rows(rows)
    }

    #[instrument(skip(self, record, sequencer), fields(member_id = %record.member_id, period = record.period))]
    async fn insert_sequenced(
        &self,
        record: &ContributionRecord,
        sequencer: &PeriodSequencer,
    ) -> RepoResult<()> {
        let insert = ContributionInsert::new(record)?;

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Serializes creates for one member until commit or rollback
        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(insert.member_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let mut periods = Self::periods_in_tx(&mut tx, insert.member_id).await?;

        if sequencer.validate_create(&periods, record.period)? == CreateDecision::Update {
            debug!("Period was recorded by a concurrent writer");
            return Err(sequencer.slot_taken(&periods));
        }

        periods.push(record.period);

        sqlx::query(
            r#"
            INSERT INTO contributions
                (id, member_id, alliance_id, period, food, wood, stone, gold,
                 recorded_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(insert.id)
        .bind(insert.member_id)
        .bind(insert.alliance_id)
        .bind(insert.period)
        .bind(insert.food)
        .bind(insert.wood)
        .bind(insert.stone)
        .bind(insert.gold)
        .bind(insert.recorded_at)
        .bind(insert.created_at)
        .bind(insert.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || sequencer.slot_taken(&periods)))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, record), fields(member_id = %record.member_id, period = record.period))]
    async fn update(&self, record: &ContributionRecord) -> RepoResult<()> {
        let update = ContributionInsert::new(record)?;

        let result = sqlx::query(
            r#"
            UPDATE contributions
            SET food = $4, wood = $5, stone = $6, gold = $7,
                recorded_at = $8, updated_at = $9
            WHERE member_id = $1 AND alliance_id = $2 AND period = $3
            "#,
        )
        .bind(update.member_id)
        .bind(update.alliance_id)
        .bind(update.period)
        .bind(update.food)
        .bind(update.wood)
        .bind(update.stone)
        .bind(update.gold)
        .bind(update.recorded_at)
        .bind(update.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(contribution_not_found(record.member_id, record.period));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, member_id: Snowflake, alliance_id: Snowflake, period: u32) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM contributions
            WHERE member_id = $1 AND alliance_id = $2 AND period = $3
            "#,
        )
        .bind(member_id.into_inner())
        .bind(alliance_id.into_inner())
        .bind(i64::from(period))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(contribution_not_found(member_id, period));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn ping(&self) -> RepoResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;
        Ok(())
    }
}

//! Contribution service
//!
//! The single write path for the ledger: records, corrects and deletes
//! per-period contributions and answers history / next-period queries.

use chrono::Utc;
use ledger_core::entities::{ContributionRecord, Member};
use ledger_core::{DomainError, Resources, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{
    ContributionResponse, NextPeriodResponse, RecordContributionRequest, RecordContributionResponse,
    RecordedContribution, UpdateContributionRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Contribution service
pub struct ContributionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ContributionService<'a> {
    /// Create a new ContributionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Record a contribution for a member's period
    ///
    /// A new period must be the member's next eligible one. Recording an
    /// already stored period overwrites it, exactly like [`Self::update`].
    #[instrument(skip(self, request), fields(member_id = %request.member_id, period = request.period))]
    pub async fn record(&self, request: RecordContributionRequest) -> ServiceResult<RecordContributionResponse> {
        let resources = contribution_resources(request.food, request.wood, request.stone, request.gold)?;
        let period = self.ctx.sequencer().check_range(request.period)?;

        let member = self.member(request.member_id).await?;
        if !member.belongs_to(request.alliance_id) {
            return Err(DomainError::AllianceMismatch {
                member_id: member.id,
                alliance_id: request.alliance_id,
            }
            .into());
        }

        let repo = self.ctx.contribution_repo();

        if let Some(mut record) = repo.find(member.id, period).await? {
            if record.alliance_id != request.alliance_id {
                return Err(DomainError::AllianceMismatch {
                    member_id: member.id,
                    alliance_id: request.alliance_id,
                }
                .into());
            }

            let recorded_at = request.recorded_at.unwrap_or(record.recorded_at);
            record.correct(resources, recorded_at);
            repo.update(&record).await?;

            info!(member_id = %record.member_id, period, "Contribution overwritten");
            return Ok(RecordedContribution {
                record: &record,
                created: false,
            }
            .into());
        }

        let record = ContributionRecord::new(
            self.ctx.generate_id(),
            member.id,
            request.alliance_id,
            period,
            resources,
            request.recorded_at.unwrap_or_else(|| Utc::now().date_naive()),
        );

        if let Err(err) = repo.insert_sequenced(&record, self.ctx.sequencer()).await {
            if let Some(expected) = err.expected_period() {
                warn!(member_id = %record.member_id, period, expected, "Period sequence gap");
            }
            return Err(err.into());
        }

        info!(
            contribution_id = %record.id,
            member_id = %record.member_id,
            period,
            total = record.total(),
            "Contribution recorded"
        );

        Ok(RecordedContribution {
            record: &record,
            created: true,
        }
        .into())
    }

    /// Correct the resources (and optionally the date) of a stored period
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        member_id: Snowflake,
        alliance_id: Snowflake,
        period: i64,
        request: UpdateContributionRequest,
    ) -> ServiceResult<ContributionResponse> {
        let resources = contribution_resources(request.food, request.wood, request.stone, request.gold)?;
        let mut record = self.stored(member_id, alliance_id, period).await?;

        let recorded_at = request.recorded_at.unwrap_or(record.recorded_at);
        record.correct(resources, recorded_at);
        self.ctx.contribution_repo().update(&record).await?;

        info!(member_id = %member_id, period = record.period, "Contribution updated");

        Ok(ContributionResponse::from(&record))
    }

    /// Delete a stored period
    ///
    /// The freed slot becomes the member's next eligible period.
    #[instrument(skip(self))]
    pub async fn delete(&self, member_id: Snowflake, alliance_id: Snowflake, period: i64) -> ServiceResult<()> {
        let slot = u32::try_from(period)
            .map_err(|_| DomainError::ContributionNotFound { member_id, period })?;

        self.ctx
            .contribution_repo()
            .delete(member_id, alliance_id, slot)
            .await?;

        info!(member_id = %member_id, period, "Contribution deleted");
        Ok(())
    }

    /// A member's contributions ordered by period
    #[instrument(skip(self))]
    pub async fn history(&self, member_id: Snowflake) -> ServiceResult<Vec<ContributionResponse>> {
        let records = self.ctx.contribution_repo().find_by_member(member_id).await?;
        Ok(records.iter().map(ContributionResponse::from).collect())
    }

    /// The period a member's next new contribution must use
    #[instrument(skip(self))]
    pub async fn next_period(&self, member_id: Snowflake) -> ServiceResult<NextPeriodResponse> {
        let member = self.member(member_id).await?;
        let recorded_periods = self.ctx.contribution_repo().recorded_periods(member.id).await?;
        let sequencer = self.ctx.sequencer();

        Ok(NextPeriodResponse {
            member_id: member.id.to_string(),
            next_period: sequencer.next_eligible(&recorded_periods),
            recorded_periods,
            period_ceiling: sequencer.ceiling(),
        })
    }

    async fn member(&self, member_id: Snowflake) -> ServiceResult<Member> {
        Ok(self
            .ctx
            .directory()
            .find_member(member_id)
            .await?
            .ok_or(DomainError::MemberNotFound(member_id))?)
    }

    /// Load a stored record, treating a slot of another alliance as absent
    async fn stored(
        &self,
        member_id: Snowflake,
        alliance_id: Snowflake,
        period: i64,
    ) -> ServiceResult<ContributionRecord> {
        let not_found = || DomainError::ContributionNotFound { member_id, period };

        let slot = u32::try_from(period).map_err(|_| not_found())?;
        let record = self
            .ctx
            .contribution_repo()
            .find(member_id, slot)
            .await?
            .filter(|record| record.alliance_id == alliance_id)
            .ok_or_else(not_found)?;

        Ok(record)
    }
}

fn contribution_resources(food: i64, wood: i64, stone: i64, gold: i64) -> Result<Resources, DomainError> {
    let resources = Resources::try_from_signed(food, wood, stone, gold)?;
    resources.validate_contribution()?;
    Ok(resources)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use ledger_core::engine::PeriodSequencer;
    use ledger_core::entities::{Alliance, Member};
    use ledger_db::{MemoryContributionRepository, MemoryDirectory};

    use super::*;
    use crate::services::context::ServiceContextBuilder;

    const ALLIANCE: i64 = 1;
    const OTHER_ALLIANCE: i64 = 2;
    const MEMBER: i64 = 10;

    fn context_with_ceiling(ceiling: u32) -> ServiceContext {
        let directory = MemoryDirectory::new();
        directory.insert_alliance(Alliance::new(Snowflake::new(ALLIANCE), "Grey Wolves", "WOLF"));
        directory.insert_alliance(Alliance::new(Snowflake::new(OTHER_ALLIANCE), "Iron Crows", "CRW"));
        directory.insert_member(Member::new(
            Snowflake::new(MEMBER),
            "Aster",
            "G-1001",
            Snowflake::new(ALLIANCE),
        ));

        ServiceContextBuilder::new()
            .contribution_repo(Arc::new(MemoryContributionRepository::new()))
            .directory(Arc::new(directory))
            .sequencer(PeriodSequencer::new(ceiling))
            .build()
            .unwrap()
    }

    fn context() -> ServiceContext {
        context_with_ceiling(100)
    }

    fn request(period: i64, food: i64, stone: i64) -> RecordContributionRequest {
        RecordContributionRequest {
            member_id: Snowflake::new(MEMBER),
            alliance_id: Snowflake::new(ALLIANCE),
            period,
            food,
            wood: 0,
            stone,
            gold: 0,
            recorded_at: NaiveDate::from_ymd_opt(2024, 6, 3),
        }
    }

    #[tokio::test]
    async fn test_records_in_sequence() {
        let ctx = context();
        let service = ContributionService::new(&ctx);

        let first = service.record(request(1, 100, 0)).await.unwrap();
        assert!(first.created);
        assert_eq!(first.total, 100);

        let next = service.next_period(Snowflake::new(MEMBER)).await.unwrap();
        assert_eq!(next.next_period, 2);
        assert_eq!(next.recorded_periods, vec![1]);

        let err = service.record(request(3, 5, 0)).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.expected_period(), Some(2));

        service.record(request(2, 0, 20)).await.unwrap();
        let history = service.history(Snowflake::new(MEMBER)).await.unwrap();
        let periods: Vec<u32> = history.iter().map(|c| c.period).collect();
        assert_eq!(periods, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_recording_existing_period_overwrites() {
        let ctx = context();
        let service = ContributionService::new(&ctx);

        let created = service.record(request(1, 100, 0)).await.unwrap();
        let again = service.record(request(1, 0, 40)).await.unwrap();

        assert!(!again.created);
        assert_eq!(again.id, created.id);
        assert_eq!(again.food, 0);
        assert_eq!(again.stone, 40);
        assert_eq!(service.history(Snowflake::new(MEMBER)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        let ctx = context_with_ceiling(5);
        let service = ContributionService::new(&ctx);

        let err = service.record(request(1, 0, 0)).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_RESOURCES");

        let err = service.record(request(1, -3, 10)).await.unwrap_err();
        assert_eq!(err.error_code(), "INVALID_RESOURCES");

        let err = service.record(request(0, 1, 0)).await.unwrap_err();
        assert_eq!(err.error_code(), "PERIOD_OUT_OF_RANGE");

        let err = service.record(request(6, 1, 0)).await.unwrap_err();
        assert_eq!(err.status_code(), 400);

        let mut wrong_alliance = request(1, 1, 0);
        wrong_alliance.alliance_id = Snowflake::new(OTHER_ALLIANCE);
        let err = service.record(wrong_alliance).await.unwrap_err();
        assert_eq!(err.error_code(), "ALLIANCE_MISMATCH");

        let mut unknown = request(1, 1, 0);
        unknown.member_id = Snowflake::new(404);
        let err = service.record(unknown).await.unwrap_err();
        assert_eq!(err.status_code(), 404);

        assert!(service.history(Snowflake::new(MEMBER)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let ctx = context();
        let service = ContributionService::new(&ctx);
        let member = Snowflake::new(MEMBER);
        let alliance = Snowflake::new(ALLIANCE);

        service.record(request(1, 100, 0)).await.unwrap();

        let update = UpdateContributionRequest {
            food: 0,
            wood: 7,
            stone: 0,
            gold: 0,
            recorded_at: None,
        };
        let updated = service.update(member, alliance, 1, update.clone()).await.unwrap();
        assert_eq!(updated.wood, 7);
        assert_eq!(updated.recorded_at, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());

        let err = service.update(member, alliance, 2, update.clone()).await.unwrap_err();
        assert_eq!(err.status_code(), 404);

        let err = service
            .update(member, Snowflake::new(OTHER_ALLIANCE), 1, update)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);

        service.delete(member, alliance, 1).await.unwrap();
        let err = service.delete(member, alliance, 1).await.unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CONTRIBUTION");

        let err = service.delete(member, alliance, -1).await.unwrap_err();
        assert_eq!(err.status_code(), 404);

        let next = service.next_period(member).await.unwrap();
        assert_eq!(next.next_period, 1);
    }

    #[tokio::test]
    async fn test_next_period_for_unknown_member() {
        let ctx = context();
        let service = ContributionService::new(&ctx);
        let err = service.next_period(Snowflake::new(404)).await.unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_MEMBER");
    }
}

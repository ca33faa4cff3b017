//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::engine::PeriodSequencer;
use crate::entities::{Alliance, ContributionRecord, Member};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Contribution Repository
// ============================================================================

/// Optional filters for listing an alliance's contributions
///
/// Bounds are inclusive. An empty filter matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContributionFilter {
    pub member_id: Option<Snowflake>,
    pub period_from: Option<u32>,
    pub period_to: Option<u32>,
    pub recorded_from: Option<NaiveDate>,
    pub recorded_to: Option<NaiveDate>,
}

impl ContributionFilter {
    pub fn for_member(member_id: Snowflake) -> Self {
        Self {
            member_id: Some(member_id),
            ..Self::default()
        }
    }

    /// Check a record against every set bound
    pub fn matches(&self, record: &ContributionRecord) -> bool {
        self.member_id.map_or(true, |id| record.member_id == id)
            && self.period_from.map_or(true, |p| record.period >= p)
            && self.period_to.map_or(true, |p| record.period <= p)
            && self.recorded_from.map_or(true, |d| record.recorded_at >= d)
            && self.recorded_to.map_or(true, |d| record.recorded_at <= d)
    }
}

#[async_trait]
pub trait ContributionRepository: Send + Sync {
    /// Find the record in a member's period slot
    async fn find(
        &self,
        member_id: Snowflake,
        period: u32,
    ) -> RepoResult<Option<ContributionRecord>>;

    /// A member's records ordered by period ascending
    async fn find_by_member(&self, member_id: Snowflake) -> RepoResult<Vec<ContributionRecord>>;

    /// An alliance's records ordered by member id, then period
    async fn find_by_alliance(
        &self,
        alliance_id: Snowflake,
        filter: &ContributionFilter,
    ) -> RepoResult<Vec<ContributionRecord>>;

    /// Periods recorded for a member, ascending
    async fn recorded_periods(&self, member_id: Snowflake) -> RepoResult<Vec<u32>>;

    /// Insert a record into a new period slot
    ///
    /// Reading the member's periods, validating the proposed period and
    /// writing happen as one atomic step. Fails with `SequenceGap` carrying
    /// the recomputed next period when the slot is not the next eligible one,
    /// including when a concurrent writer filled it first.
    async fn insert_sequenced(
        &self,
        record: &ContributionRecord,
        sequencer: &PeriodSequencer,
    ) -> RepoResult<()>;

    /// Overwrite the resources and date of an existing record
    async fn update(&self, record: &ContributionRecord) -> RepoResult<()>;

    /// Remove a record; other periods are left untouched
    async fn delete(
        &self,
        member_id: Snowflake,
        alliance_id: Snowflake,
        period: u32,
    ) -> RepoResult<()>;

    /// Check the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Member Directory
// ============================================================================

/// Read-only view of the member/alliance directory owned by another system
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Find member by ID
    async fn find_member(&self, id: Snowflake) -> RepoResult<Option<Member>>;

    /// Find alliance by ID
    async fn find_alliance(&self, id: Snowflake) -> RepoResult<Option<Alliance>>;

    /// Find every known member among `ids`; unknown ids are skipped
    async fn find_members(&self, ids: &[Snowflake]) -> RepoResult<Vec<Member>>;
}

//! In-memory ContributionRepository
//!
//! Records live in a `DashMap` keyed by member. The map's entry guard for a
//! member is the critical section around read-validate-write, so creates for
//! the same member are serialized while different members proceed in parallel.

use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, instrument};

use ledger_core::engine::{CreateDecision, PeriodSequencer};
use ledger_core::entities::ContributionRecord;
use ledger_core::traits::{ContributionFilter, ContributionRepository, RepoResult};
use ledger_core::value_objects::Snowflake;

use crate::repositories::contribution_not_found;

/// Contribution store held entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryContributionRepository {
    /// Member ID to that member's records keyed by period
    members: DashMap<Snowflake, BTreeMap<u32, ContributionRecord>>,
}

impl MemoryContributionRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored records
    pub fn len(&self) -> usize {
        self.members.iter().map(|slots| slots.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ContributionRepository for MemoryContributionRepository {
    #[instrument(skip(self))]
    async fn find(&self, member_id: Snowflake, period: u32) -> RepoResult<Option<ContributionRecord>> {
        Ok(self
            .members
            .get(&member_id)
            .and_then(|slots| slots.get(&period).cloned()))
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, member_id: Snowflake) -> RepoResult<Vec<ContributionRecord>> {
        Ok(self
            .members
            .get(&member_id)
            .map(|slots| slots.values().cloned().collect())
            .unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn find_by_alliance(
        &self,
        alliance_id: Snowflake,
        filter: &ContributionFilter,
    ) -> RepoResult<Vec<ContributionRecord>> {
        let mut records: Vec<ContributionRecord> = self
            .members
            .iter()
            .flat_map(|slots| {
                slots
                    .values()
                    .filter(|r| r.alliance_id == alliance_id && filter.matches(r))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();

        records.sort_by_key(ContributionRecord::slot);
        Ok(records)
    }

    #[instrument(skip(self))]
    async fn recorded_periods(&self, member_id: Snowflake) -> RepoResult<Vec<u32>> {
        Ok(self
            .members
            .get(&member_id)
            .map(|slots| slots.keys().copied().collect())
            .unwrap_or_default())
    }

    #[instrument(skip(self, record, sequencer), fields(member_id = %record.member_id, period = record.period))]
    async fn insert_sequenced(
        &self,
        record: &ContributionRecord,
        sequencer: &PeriodSequencer,
    ) -> RepoResult<()> {
        // Held until the end of the scope; no await points below
        let mut slots = self.members.entry(record.member_id).or_default();

        let periods: Vec<u32> = slots.keys().copied().collect();
        if sequencer.validate_create(&periods, record.period)? == CreateDecision::Update {
            debug!("Period was recorded by a concurrent writer");
            return Err(sequencer.slot_taken(&periods));
        }

        slots.insert(record.period, record.clone());
        Ok(())
    }

    #[instrument(skip(self, record), fields(member_id = %record.member_id, period = record.period))]
    async fn update(&self, record: &ContributionRecord) -> RepoResult<()> {
        let mut slots = self
            .members
            .get_mut(&record.member_id)
            .ok_or_else(|| contribution_not_found(record.member_id, record.period))?;

        match slots.get_mut(&record.period) {
            Some(existing) if existing.alliance_id == record.alliance_id => {
                existing.resources = record.resources;
                existing.recorded_at = record.recorded_at;
                existing.updated_at = record.updated_at;
                Ok(())
            }
            _ => Err(contribution_not_found(record.member_id, record.period)),
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, member_id: Snowflake, alliance_id: Snowflake, period: u32) -> RepoResult<()> {
        let mut slots = self
            .members
            .get_mut(&member_id)
            .ok_or_else(|| contribution_not_found(member_id, period))?;

        match slots.get(&period) {
            Some(existing) if existing.alliance_id == alliance_id => {
                slots.remove(&period);
                Ok(())
            }
            _ => Err(contribution_not_found(member_id, period)),
        }
    }

    async fn ping(&self) -> RepoResult<()> {
        Ok(())
    }
}

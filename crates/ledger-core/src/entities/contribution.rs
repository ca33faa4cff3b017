//! Contribution record - one member's resources for one period

use chrono::{DateTime, NaiveDate, Utc};

use crate::value_objects::{Resources, Snowflake};

/// A member's contribution for a single period (week)
///
/// `(member_id, period)` identifies the slot. `member_id`, `alliance_id` and
/// `period` never change after creation; moving a contribution to another
/// period is a delete followed by a create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionRecord {
    pub id: Snowflake,
    pub member_id: Snowflake,
    pub alliance_id: Snowflake,
    pub period: u32,
    pub resources: Resources,
    /// Date the contribution was made, as reported by the member
    pub recorded_at: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContributionRecord {
    pub fn new(
        id: Snowflake,
        member_id: Snowflake,
        alliance_id: Snowflake,
        period: u32,
        resources: Resources,
        recorded_at: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            member_id,
            alliance_id,
            period,
            resources,
            recorded_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the resources and date of an existing record
    pub fn correct(&mut self, resources: Resources, recorded_at: NaiveDate) {
        self.resources = resources;
        self.recorded_at = recorded_at;
        self.updated_at = Utc::now();
    }

    /// The `(member_id, period)` slot this record occupies
    #[inline]
    pub fn slot(&self) -> (Snowflake, u32) {
        (self.member_id, self.period)
    }

    #[inline]
    pub fn total(&self) -> u128 {
        self.resources.total()
    }
}

//! Aggregation & ranking over a snapshot of contribution records
//!
//! All views are recomputed from the records passed in; nothing is cached.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::entities::ContributionRecord;
use crate::value_objects::{ResourceTotals, Snowflake};

/// Totals for a single member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemberTotals {
    pub resources: ResourceTotals,
    pub total: u128,
    /// Number of distinct periods the member has recorded
    pub periods_contributed: u32,
    pub last_recorded_at: Option<NaiveDate>,
}

/// Totals for a whole alliance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllianceTotals {
    pub resources: ResourceTotals,
    pub total: u128,
    /// Number of distinct `(member, period)` slots
    pub periods_contributed: u32,
    pub member_count: u32,
    pub last_recorded_at: Option<NaiveDate>,
}

/// One row of a leaderboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: u32,
    pub member_id: Snowflake,
    pub totals: MemberTotals,
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Sum a member's records
pub fn member_totals<'a, I>(records: I) -> MemberTotals
where
    I: IntoIterator<Item = &'a ContributionRecord>,
{
    let mut resources = ResourceTotals::default();
    let mut periods = BTreeSet::new();
    let mut last_recorded_at: Option<NaiveDate> = None;

    for record in records {
        resources += record.resources;
        periods.insert(record.period);
        last_recorded_at = last_recorded_at.max(Some(record.recorded_at));
    }

    MemberTotals {
        resources,
        total: resources.total(),
        periods_contributed: count(periods.len()),
        last_recorded_at,
    }
}

/// Sum every record of an alliance
pub fn alliance_totals<'a, I>(records: I) -> AllianceTotals
where
    I: IntoIterator<Item = &'a ContributionRecord>,
{
    let mut resources = ResourceTotals::default();
    let mut slots = BTreeSet::new();
    let mut members = BTreeSet::new();
    let mut last_recorded_at: Option<NaiveDate> = None;

    for record in records {
        resources += record.resources;
        slots.insert(record.slot());
        members.insert(record.member_id);
        last_recorded_at = last_recorded_at.max(Some(record.recorded_at));
    }

    AllianceTotals {
        resources,
        total: resources.total(),
        periods_contributed: count(slots.len()),
        member_count: count(members.len()),
        last_recorded_at,
    }
}

/// Rank members by total contributed, highest first
///
/// Ties are broken by ascending member id, so the result does not depend on
/// the order of `records`. At most `top_n` entries are returned.
pub fn leaderboard(records: &[ContributionRecord], top_n: usize) -> Vec<LeaderboardEntry> {
    let mut by_member: BTreeMap<Snowflake, Vec<&ContributionRecord>> = BTreeMap::new();
    for record in records {
        by_member.entry(record.member_id).or_default().push(record);
    }

    let mut ranked: Vec<(Snowflake, MemberTotals)> = by_member
        .into_iter()
        .map(|(member_id, records)| (member_id, member_totals(records)))
        .collect();

    ranked.sort_by(|(a_id, a), (b_id, b)| b.total.cmp(&a.total).then_with(|| a_id.cmp(b_id)));

    ranked
        .into_iter()
        .take(top_n)
        .zip(1u32..)
        .map(|((member_id, totals), rank)| LeaderboardEntry {
            rank,
            member_id,
            totals,
        })
        .collect()
}

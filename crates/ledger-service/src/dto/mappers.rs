//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use ledger_core::engine::{AllianceTotals, LeaderboardEntry, MemberTotals, TaxEntry, TaxTotals};
use ledger_core::entities::{Alliance, ContributionRecord};
use ledger_core::Snowflake;

use super::responses::{
    AllianceTotalsResponse, ContributionResponse, LeaderboardEntryResponse, MemberTotalsResponse,
    RecordContributionResponse, TaxEntryResponse, TaxTotalsResponse,
};

// ============================================================================
// Contribution Mappers
// ============================================================================

impl From<&ContributionRecord> for ContributionResponse {
    fn from(record: &ContributionRecord) -> Self {
        Self {
            id: record.id.to_string(),
            member_id: record.member_id.to_string(),
            alliance_id: record.alliance_id.to_string(),
            period: record.period,
            food: record.resources.food,
            wood: record.resources.wood,
            stone: record.resources.stone,
            gold: record.resources.gold,
            total: record.total(),
            recorded_at: record.recorded_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl From<ContributionRecord> for ContributionResponse {
    fn from(record: ContributionRecord) -> Self {
        Self::from(&record)
    }
}

/// Helper struct for creating RecordContributionResponse
pub struct RecordedContribution<'a> {
    pub record: &'a ContributionRecord,
    /// `false` when the write overwrote a stored period
    pub created: bool,
}

impl From<RecordedContribution<'_>> for RecordContributionResponse {
    fn from(value: RecordedContribution<'_>) -> Self {
        let RecordedContribution { record, created } = value;
        Self {
            id: record.id.to_string(),
            member_id: record.member_id.to_string(),
            alliance_id: record.alliance_id.to_string(),
            period: record.period,
            food: record.resources.food,
            wood: record.resources.wood,
            stone: record.resources.stone,
            gold: record.resources.gold,
            total: record.total(),
            recorded_at: record.recorded_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
            created,
        }
    }
}

// ============================================================================
// Report Mappers
// ============================================================================

/// Helper struct for creating MemberTotalsResponse
pub struct MemberTotalsFor {
    pub member_id: Snowflake,
    pub totals: MemberTotals,
}

impl From<MemberTotalsFor> for MemberTotalsResponse {
    fn from(value: MemberTotalsFor) -> Self {
        let MemberTotalsFor { member_id, totals } = value;
        Self {
            member_id: member_id.to_string(),
            food: totals.resources.food,
            wood: totals.resources.wood,
            stone: totals.resources.stone,
            gold: totals.resources.gold,
            total: totals.total,
            periods_contributed: totals.periods_contributed,
            last_recorded_at: totals.last_recorded_at,
        }
    }
}

/// Helper struct for creating AllianceTotalsResponse
pub struct AllianceWithTotals {
    pub alliance: Alliance,
    pub totals: AllianceTotals,
}

impl From<AllianceWithTotals> for AllianceTotalsResponse {
    fn from(value: AllianceWithTotals) -> Self {
        let AllianceWithTotals { alliance, totals } = value;
        Self {
            alliance_id: alliance.id.to_string(),
            name: alliance.name,
            tag: alliance.tag,
            food: totals.resources.food,
            wood: totals.resources.wood,
            stone: totals.resources.stone,
            gold: totals.resources.gold,
            total: totals.total,
            periods_contributed: totals.periods_contributed,
            member_count: totals.member_count,
            last_recorded_at: totals.last_recorded_at,
        }
    }
}

/// Helper struct for creating LeaderboardEntryResponse
pub struct RankedMember {
    pub entry: LeaderboardEntry,
    pub member_name: Option<String>,
}

impl From<RankedMember> for LeaderboardEntryResponse {
    fn from(value: RankedMember) -> Self {
        let RankedMember { entry, member_name } = value;
        Self {
            rank: entry.rank,
            member_id: entry.member_id.to_string(),
            member_name,
            food: entry.totals.resources.food,
            wood: entry.totals.resources.wood,
            stone: entry.totals.resources.stone,
            gold: entry.totals.resources.gold,
            total: entry.totals.total,
            periods_contributed: entry.totals.periods_contributed,
        }
    }
}

// ============================================================================
// Tax Mappers
// ============================================================================

impl From<(usize, &TaxEntry)> for TaxEntryResponse {
    fn from((index, entry): (usize, &TaxEntry)) -> Self {
        Self {
            index,
            gross: entry.gross,
            tax: entry.tax,
            net: entry.net,
        }
    }
}

impl From<TaxTotals> for TaxTotalsResponse {
    fn from(totals: TaxTotals) -> Self {
        Self {
            total_gross: totals.total_gross,
            total_tax: totals.total_tax,
            total_net: totals.total_net,
            average_tax_percent: totals.average_tax_percent,
        }
    }
}

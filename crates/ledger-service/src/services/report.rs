//! Report service
//!
//! Read-only aggregation over the ledger: member and alliance totals,
//! leaderboards and filtered alliance listings.

use std::collections::HashMap;

use ledger_core::engine::{alliance_totals, leaderboard, member_totals};
use ledger_core::entities::{Alliance, Member};
use ledger_core::traits::ContributionFilter;
use ledger_core::{DomainError, Snowflake};
use tracing::instrument;
use validator::Validate;

use crate::dto::{
    AllianceContributionsQuery, AllianceTotalsResponse, AllianceWithTotals, ContributionResponse,
    LeaderboardEntryResponse, LeaderboardResponse, MemberTotalsFor, MemberTotalsResponse,
    RankedMember,
};

use super::context::{ServiceContext, MAX_LEADERBOARD_LIMIT};
use super::error::{ServiceError, ServiceResult};

/// Report service
pub struct ReportService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReportService<'a> {
    /// Create a new ReportService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Totals over every period a member recorded
    #[instrument(skip(self))]
    pub async fn member_totals(&self, member_id: Snowflake) -> ServiceResult<MemberTotalsResponse> {
        let member = self.member(member_id).await?;
        let records = self.ctx.contribution_repo().find_by_member(member.id).await?;

        Ok(MemberTotalsResponse::from(MemberTotalsFor {
            member_id: member.id,
            totals: member_totals(&records),
        }))
    }

    /// Totals over every record of an alliance
    #[instrument(skip(self))]
    pub async fn alliance_totals(&self, alliance_id: Snowflake) -> ServiceResult<AllianceTotalsResponse> {
        let alliance = self.alliance(alliance_id).await?;
        let records = self
            .ctx
            .contribution_repo()
            .find_by_alliance(alliance.id, &ContributionFilter::default())
            .await?;

        let totals = alliance_totals(&records);
        Ok(AllianceTotalsResponse::from(AllianceWithTotals { alliance, totals }))
    }

    /// Members of an alliance ranked by total contributed
    ///
    /// `limit` is clamped to 1-100 and defaults to the configured size.
    #[instrument(skip(self))]
    pub async fn leaderboard(
        &self,
        alliance_id: Snowflake,
        limit: Option<u32>,
    ) -> ServiceResult<LeaderboardResponse> {
        let alliance = self.alliance(alliance_id).await?;
        let limit = limit
            .unwrap_or_else(|| self.ctx.leaderboard_limit())
            .clamp(1, MAX_LEADERBOARD_LIMIT);

        let records = self
            .ctx
            .contribution_repo()
            .find_by_alliance(alliance.id, &ContributionFilter::default())
            .await?;
        let ranked = leaderboard(&records, limit as usize);

        let ids: Vec<Snowflake> = ranked.iter().map(|entry| entry.member_id).collect();
        let names: HashMap<Snowflake, String> = self
            .ctx
            .directory()
            .find_members(&ids)
            .await?
            .into_iter()
            .map(|member| (member.id, member.name))
            .collect();

        let entries = ranked
            .into_iter()
            .map(|entry| {
                let member_name = names.get(&entry.member_id).cloned();
                LeaderboardEntryResponse::from(RankedMember { entry, member_name })
            })
            .collect();

        Ok(LeaderboardResponse {
            alliance_id: alliance.id.to_string(),
            limit,
            entries,
        })
    }

    /// An alliance's records, ordered by member then period
    #[instrument(skip(self))]
    pub async fn alliance_contributions(
        &self,
        alliance_id: Snowflake,
        query: AllianceContributionsQuery,
    ) -> ServiceResult<Vec<ContributionResponse>> {
        query
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let alliance = self.alliance(alliance_id).await?;
        let filter = ContributionFilter {
            member_id: query.member_id,
            period_from: query.period_from.map(period_bound),
            period_to: query.period_to.map(period_bound),
            recorded_from: query.recorded_from,
            recorded_to: query.recorded_to,
        };

        let records = self
            .ctx
            .contribution_repo()
            .find_by_alliance(alliance.id, &filter)
            .await?;
        Ok(records.iter().map(ContributionResponse::from).collect())
    }

    async fn member(&self, member_id: Snowflake) -> ServiceResult<Member> {
        Ok(self
            .ctx
            .directory()
            .find_member(member_id)
            .await?
            .ok_or(DomainError::MemberNotFound(member_id))?)
    }

    async fn alliance(&self, alliance_id: Snowflake) -> ServiceResult<Alliance> {
        Ok(self
            .ctx
            .directory()
            .find_alliance(alliance_id)
            .await?
            .ok_or(DomainError::AllianceNotFound(alliance_id))?)
    }
}

/// Narrow a validated (positive) period bound; bounds past `u32::MAX` match nothing anyway
fn period_bound(period: i64) -> u32 {
    u32::try_from(period).unwrap_or(u32::MAX)
}

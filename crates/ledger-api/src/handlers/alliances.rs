//! Alliance handlers
//!
//! Leaderboard, totals and filtered contribution listings.

use axum::{
    extract::{Path, State},
    Json,
};
use ledger_service::dto::{
    AllianceContributionsQuery, AllianceTotalsResponse, ContributionResponse, LeaderboardQuery,
    LeaderboardResponse,
};
use ledger_service::ReportService;

use crate::extractors::{AllianceIdPath, QueryParams};
use crate::response::ApiResult;
use crate::state::AppState;

/// Members of the alliance ranked by total contributed
///
/// GET /alliances/{alliance_id}/leaderboard?limit={1-100}
pub async fn get_leaderboard(
    State(state): State<AppState>,
    Path(path): Path<AllianceIdPath>,
    QueryParams(query): QueryParams<LeaderboardQuery>,
) -> ApiResult<Json<LeaderboardResponse>> {
    let service = ReportService::new(state.service_context());
    let response = service.leaderboard(path.alliance_id()?, query.limit).await?;
    Ok(Json(response))
}

/// Totals over all members of the alliance
///
/// GET /alliances/{alliance_id}/totals
pub async fn get_alliance_totals(
    State(state): State<AppState>,
    Path(path): Path<AllianceIdPath>,
) -> ApiResult<Json<AllianceTotalsResponse>> {
    let service = ReportService::new(state.service_context());
    let response = service.alliance_totals(path.alliance_id()?).await?;
    Ok(Json(response))
}

/// The alliance's contributions, optionally filtered
///
/// GET /alliances/{alliance_id}/contributions
pub async fn get_alliance_contributions(
    State(state): State<AppState>,
    Path(path): Path<AllianceIdPath>,
    QueryParams(query): QueryParams<AllianceContributionsQuery>,
) -> ApiResult<Json<Vec<ContributionResponse>>> {
    let service = ReportService::new(state.service_context());
    let response = service
        .alliance_contributions(path.alliance_id()?, query)
        .await?;
    Ok(Json(response))
}

//! Member handlers
//!
//! Per-member sequencing and totals.

use axum::{
    extract::{Path, State},
    Json,
};
use ledger_service::dto::{MemberTotalsResponse, NextPeriodResponse};
use ledger_service::{ContributionService, ReportService};

use crate::extractors::MemberIdPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// Next period the member may record
///
/// GET /members/{member_id}/next-period
pub async fn get_next_period(
    State(state): State<AppState>,
    Path(path): Path<MemberIdPath>,
) -> ApiResult<Json<NextPeriodResponse>> {
    let service = ContributionService::new(state.service_context());
    let response = service.next_period(path.member_id()?).await?;
    Ok(Json(response))
}

/// Totals over every period the member recorded
///
/// GET /members/{member_id}/totals
pub async fn get_member_totals(
    State(state): State<AppState>,
    Path(path): Path<MemberIdPath>,
) -> ApiResult<Json<MemberTotalsResponse>> {
    let service = ReportService::new(state.service_context());
    let response = service.member_totals(path.member_id()?).await?;
    Ok(Json(response))
}

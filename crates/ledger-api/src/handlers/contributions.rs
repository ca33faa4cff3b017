//! Contribution handlers
//!
//! Endpoints for recording, correcting, deleting and listing contributions.

use axum::{
    extract::{Path, State},
    Json,
};
use ledger_core::Snowflake;
use ledger_service::dto::{
    ContributionHistoryQuery, ContributionResponse, RecordContributionRequest,
    RecordContributionResponse, UpdateContributionRequest,
};
use ledger_service::ContributionService;

use crate::extractors::{ContributionSlotPath, QueryParams, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Record a contribution (creates the next period or overwrites a stored one)
///
/// POST /contributions
pub async fn record_contribution(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RecordContributionRequest>,
) -> ApiResult<Created<Json<RecordContributionResponse>>> {
    let service = ContributionService::new(state.service_context());
    let response = service.record(request).await?;
    Ok(Created(Json(response)))
}

/// Correct a stored contribution
///
/// PUT /contributions/{member_id}/{alliance_id}/{period}
pub async fn update_contribution(
    State(state): State<AppState>,
    Path(path): Path<ContributionSlotPath>,
    ValidatedJson(request): ValidatedJson<UpdateContributionRequest>,
) -> ApiResult<Json<ContributionResponse>> {
    let service = ContributionService::new(state.service_context());
    let response = service
        .update(path.member_id()?, path.alliance_id()?, path.period()?, request)
        .await?;
    Ok(Json(response))
}

/// Delete a stored contribution
///
/// DELETE /contributions/{member_id}/{alliance_id}/{period}
pub async fn delete_contribution(
    State(state): State<AppState>,
    Path(path): Path<ContributionSlotPath>,
) -> ApiResult<NoContent> {
    let service = ContributionService::new(state.service_context());
    service
        .delete(path.member_id()?, path.alliance_id()?, path.period()?)
        .await?;
    Ok(NoContent)
}

/// A member's contribution history ordered by period
///
/// GET /contributions?member_id={member_id}
pub async fn get_contributions(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ContributionHistoryQuery>,
) -> ApiResult<Json<Vec<ContributionResponse>>> {
    let member_id: Snowflake = query
        .member_id
        .as_deref()
        .ok_or_else(|| ApiError::invalid_query("member_id is required"))?
        .parse()
        .map_err(|_| ApiError::invalid_query("Invalid member_id format"))?;

    let service = ContributionService::new(state.service_context());
    let response = service.history(member_id).await?;
    Ok(Json(response))
}

//! Tax handlers

use axum::Json;
use ledger_service::dto::{TaxCalculationRequest, TaxCalculationResponse};
use ledger_service::TaxService;

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;

/// Split a batch of gross amounts into tax and net
///
/// POST /tax/calculate
pub async fn calculate_tax(
    ValidatedJson(request): ValidatedJson<TaxCalculationRequest>,
) -> ApiResult<Json<TaxCalculationResponse>> {
    let response = TaxService::new().calculate(request)?;
    Ok(Json(response))
}

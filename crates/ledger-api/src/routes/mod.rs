//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{alliances, contributions, health, members, tax};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(contribution_routes())
        .merge(member_routes())
        .merge(alliance_routes())
        .merge(tax_routes())
}

/// Contribution routes
fn contribution_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/contributions",
            get(contributions::get_contributions).post(contributions::record_contribution),
        )
        .route(
            "/contributions/:member_id/:alliance_id/:period",
            put(contributions::update_contribution).delete(contributions::delete_contribution),
        )
}

/// Member routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/members/:member_id/next-period", get(members::get_next_period))
        .route("/members/:member_id/totals", get(members::get_member_totals))
}

/// Alliance routes
fn alliance_routes() -> Router<AppState> {
    Router::new()
        .route("/alliances/:alliance_id/leaderboard", get(alliances::get_leaderboard))
        .route("/alliances/:alliance_id/totals", get(alliances::get_alliance_totals))
        .route(
            "/alliances/:alliance_id/contributions",
            get(alliances::get_alliance_contributions),
        )
}

/// Tax routes
fn tax_routes() -> Router<AppState> {
    Router::new().route("/tax/calculate", post(tax::calculate_tax))
}

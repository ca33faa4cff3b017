//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use ledger_core::{ResourceKind, Resources};
use rust_decimal::Decimal;
use serde::Serialize;

// ============================================================================
// Contribution Responses
// ============================================================================

/// A stored contribution record
#[derive(Debug, Clone, Serialize)]
pub struct ContributionResponse {
    pub id: String,
    pub member_id: String,
    pub alliance_id: String,
    pub period: u32,
    pub food: u64,
    pub wood: u64,
    pub stone: u64,
    pub gold: u64,
    pub total: u128,
    pub recorded_at: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Result of recording a contribution
///
/// Same fields as [`ContributionResponse`] plus `created`. Listed out rather
/// than flattened: serde's flatten buffer cannot carry a `u128` total.
#[derive(Debug, Clone, Serialize)]
pub struct RecordContributionResponse {
    pub id: String,
    pub member_id: String,
    pub alliance_id: String,
    pub period: u32,
    pub food: u64,
    pub wood: u64,
    pub stone: u64,
    pub gold: u64,
    pub total: u128,
    pub recorded_at: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// `false` when an already recorded period was overwritten
    pub created: bool,
}

/// Next period a member may record
#[derive(Debug, Clone, Serialize)]
pub struct NextPeriodResponse {
    pub member_id: String,
    pub next_period: u32,
    pub recorded_periods: Vec<u32>,
    pub period_ceiling: u32,
}

// ============================================================================
// Report Responses
// ============================================================================

/// Totals for one member
#[derive(Debug, Clone, Serialize)]
pub struct MemberTotalsResponse {
    pub member_id: String,
    pub food: u128,
    pub wood: u128,
    pub stone: u128,
    pub gold: u128,
    pub total: u128,
    pub periods_contributed: u32,
    pub last_recorded_at: Option<NaiveDate>,
}

/// Totals for one alliance
#[derive(Debug, Clone, Serialize)]
pub struct AllianceTotalsResponse {
    pub alliance_id: String,
    pub name: String,
    pub tag: String,
    pub food: u128,
    pub wood: u128,
    pub stone: u128,
    pub gold: u128,
    pub total: u128,
    pub periods_contributed: u32,
    pub member_count: u32,
    pub last_recorded_at: Option<NaiveDate>,
}

/// One leaderboard row
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntryResponse {
    pub rank: u32,
    pub member_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
    pub food: u128,
    pub wood: u128,
    pub stone: u128,
    pub gold: u128,
    pub total: u128,
    pub periods_contributed: u32,
}

/// Alliance leaderboard
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResponse {
    pub alliance_id: String,
    pub limit: u32,
    pub entries: Vec<LeaderboardEntryResponse>,
}

// ============================================================================
// Tax Responses
// ============================================================================

/// Split of one gross amount
#[derive(Debug, Clone, Serialize)]
pub struct TaxEntryResponse {
    pub index: usize,
    pub gross: u64,
    pub tax: u64,
    pub net: u64,
}

/// Batch totals
#[derive(Debug, Clone, Serialize)]
pub struct TaxTotalsResponse {
    pub total_gross: u128,
    pub total_tax: u128,
    pub total_net: u128,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_tax_percent: Decimal,
}

/// Net amount moved to the bank for one entry
#[derive(Debug, Clone, Serialize)]
pub struct DepositResponse {
    pub index: usize,
    pub kind: ResourceKind,
    pub net: u64,
}

/// Result of a batch tax calculation
#[derive(Debug, Clone, Serialize)]
pub struct TaxCalculationResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    pub entries: Vec<TaxEntryResponse>,
    pub totals: TaxTotalsResponse,
    pub deposited: Vec<DepositResponse>,
    /// Deposited nets summed per resource
    pub deposited_resources: Resources,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub storage: String,
}

impl ReadinessResponse {
    pub fn ready(storage_healthy: bool) -> Self {
        Self {
            status: if storage_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                storage: if storage_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}

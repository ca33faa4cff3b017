//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Resource counters are accepted as signed integers so that negative input is
//! reported as an invalid-resources error instead of a body parse failure.

use chrono::NaiveDate;
use ledger_core::{ResourceKind, Snowflake};
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Contribution Requests
// ============================================================================

/// Record (create or upsert) a contribution
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordContributionRequest {
    pub member_id: Snowflake,
    pub alliance_id: Snowflake,
    pub period: i64,

    #[serde(default)]
    pub food: i64,
    #[serde(default)]
    pub wood: i64,
    #[serde(default)]
    pub stone: i64,
    #[serde(default)]
    pub gold: i64,

    /// Defaults to today (UTC)
    pub recorded_at: Option<NaiveDate>,
}

/// Correct an existing contribution
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContributionRequest {
    #[serde(default)]
    pub food: i64,
    #[serde(default)]
    pub wood: i64,
    #[serde(default)]
    pub stone: i64,
    #[serde(default)]
    pub gold: i64,

    /// Keeps the stored date when omitted
    pub recorded_at: Option<NaiveDate>,
}

/// Query for a member's contribution history
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionHistoryQuery {
    pub member_id: Option<String>,
}

/// Filters for an alliance's contributions
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AllianceContributionsQuery {
    pub member_id: Option<Snowflake>,

    #[validate(range(min = 1, message = "period_from must be at least 1"))]
    pub period_from: Option<i64>,

    #[validate(range(min = 1, message = "period_to must be at least 1"))]
    pub period_to: Option<i64>,

    pub recorded_from: Option<NaiveDate>,
    pub recorded_to: Option<NaiveDate>,
}

/// Leaderboard query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardQuery {
    /// Number of entries (1-100, defaults to the configured limit)
    pub limit: Option<u32>,
}

// ============================================================================
// Tax Requests
// ============================================================================

/// Batch tax calculation
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaxCalculationRequest {
    /// Flat tax rate in percent, 0-100
    pub rate: Decimal,

    /// Gross amounts, in entry order
    #[validate(length(min = 1, max = 500, message = "entries must hold 1-500 amounts"))]
    pub entries: Vec<i64>,

    /// Entries whose net amount is deposited, and into which resource
    #[serde(default)]
    pub deposit: Vec<DepositRequest>,
}

/// Deposit the net of one entry into a resource counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DepositRequest {
    /// Index into `entries`
    pub index: usize,
    pub kind: ResourceKind,
}

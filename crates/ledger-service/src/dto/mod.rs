//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    AllianceContributionsQuery, ContributionHistoryQuery, DepositRequest, LeaderboardQuery,
    RecordContributionRequest, TaxCalculationRequest, UpdateContributionRequest,
};

// Re-export commonly used response types
pub use responses::{
    AllianceTotalsResponse, ContributionResponse, DepositResponse, HealthChecks, HealthResponse,
    LeaderboardEntryResponse, LeaderboardResponse, MemberTotalsResponse, NextPeriodResponse,
    ReadinessResponse, RecordContributionResponse, TaxCalculationResponse, TaxEntryResponse,
    TaxTotalsResponse,
};

// Re-export mappers and helper structs
pub use mappers::{AllianceWithTotals, MemberTotalsFor, RankedMember, RecordedContribution};

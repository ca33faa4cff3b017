//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("No contribution recorded for member {member_id} in period {period}")]
    ContributionNotFound { member_id: Snowflake, period: i64 },

    #[error("Member not found: {0}")]
    MemberNotFound(Snowflake),

    #[error("Alliance not found: {0}")]
    AllianceNotFound(Snowflake),

    #[error("Tax entry not found at index {0}")]
    TaxEntryNotFound(usize),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid resources: {0}")]
    InvalidResources(String),

    #[error("Period {period} is outside the allowed range 1..={ceiling}")]
    PeriodOutOfRange { period: i64, ceiling: u32 },

    #[error("Member {member_id} does not belong to alliance {alliance_id}")]
    AllianceMismatch {
        member_id: Snowflake,
        alliance_id: Snowflake,
    },

    #[error("Invalid tax rate: {0}")]
    InvalidTaxRate(String),

    #[error("Gross amount must be positive, got {0}")]
    InvalidGrossAmount(i64),

    #[error("Tax rate must be set before entries are added")]
    TaxRateNotSet,

    #[error("Tax rate cannot change while the session holds entries")]
    TaxRateLocked,

    #[error("Resource counter overflow")]
    ResourceOverflow,

    // =========================================================================
    // Sequencing Errors
    // =========================================================================
    #[error("Period sequence gap: next period to record is {expected}")]
    SequenceGap { expected: u32 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ContributionNotFound { .. } => "UNKNOWN_CONTRIBUTION",
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::AllianceNotFound(_) => "UNKNOWN_ALLIANCE",
            Self::TaxEntryNotFound(_) => "UNKNOWN_TAX_ENTRY",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidResources(_) => "INVALID_RESOURCES",
            Self::PeriodOutOfRange { .. } => "PERIOD_OUT_OF_RANGE",
            Self::AllianceMismatch { .. } => "ALLIANCE_MISMATCH",
            Self::InvalidTaxRate(_) => "INVALID_TAX_RATE",
            Self::InvalidGrossAmount(_) => "INVALID_GROSS_AMOUNT",
            Self::TaxRateNotSet => "TAX_RATE_NOT_SET",
            Self::TaxRateLocked => "TAX_RATE_LOCKED",
            Self::ResourceOverflow => "RESOURCE_OVERFLOW",

            // Sequencing
            Self::SequenceGap { .. } => "SEQUENCE_GAP",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ContributionNotFound { .. }
                | Self::MemberNotFound(_)
                | Self::AllianceNotFound(_)
                | Self::TaxEntryNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidResources(_)
                | Self::PeriodOutOfRange { .. }
                | Self::AllianceMismatch { .. }
                | Self::InvalidTaxRate(_)
                | Self::InvalidGrossAmount(_)
                | Self::TaxRateNotSet
                | Self::TaxRateLocked
                | Self::ResourceOverflow
        )
    }

    /// Check if this is a conflict error
    ///
    /// A sequence gap is the only conflict the ledger reports; racing writes
    /// on the same slot are folded into it.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::SequenceGap { .. })
    }

    /// The period the caller should submit instead, for sequence gaps
    pub fn expected_period(&self) -> Option<u32> {
        match self {
            Self::SequenceGap { expected } => Some(*expected),
            _ => None,
        }
    }
}

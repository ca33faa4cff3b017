//! Error handling utilities for repositories

use ledger_core::error::DomainError;
use ledger_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "contribution not found" error
pub fn contribution_not_found(member_id: Snowflake, period: u32) -> DomainError {
    DomainError::ContributionNotFound {
        member_id,
        period: i64::from(period),
    }
}

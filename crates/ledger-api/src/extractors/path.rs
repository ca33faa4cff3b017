//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs and periods from path parameters.

use ledger_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// Path parameters with member_id
#[derive(Debug, Deserialize)]
pub struct MemberIdPath {
    pub member_id: String,
}

impl MemberIdPath {
    /// Parse member_id as Snowflake
    pub fn member_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.member_id, "member_id")
    }
}

/// Path parameters with alliance_id
#[derive(Debug, Deserialize)]
pub struct AllianceIdPath {
    pub alliance_id: String,
}

impl AllianceIdPath {
    /// Parse alliance_id as Snowflake
    pub fn alliance_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.alliance_id, "alliance_id")
    }
}

/// Path parameters addressing one contribution slot
#[derive(Debug, Deserialize)]
pub struct ContributionSlotPath {
    pub member_id: String,
    pub alliance_id: String,
    pub period: String,
}

impl ContributionSlotPath {
    /// Parse member_id as Snowflake
    pub fn member_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.member_id, "member_id")
    }

    /// Parse alliance_id as Snowflake
    pub fn alliance_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.alliance_id, "alliance_id")
    }

    /// Parse period as an integer; range checks happen in the service
    pub fn period(&self) -> Result<i64, ApiError> {
        self.period
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid period format"))
    }
}

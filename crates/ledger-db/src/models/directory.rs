//! Directory database models (read-only)

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for alliances table
#[derive(Debug, Clone, FromRow)]
pub struct AllianceModel {
    pub id: i64,
    pub name: String,
    pub tag: String,
    pub leader_id: Option<i64>,
    pub bank_name: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Database model for members table
#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    pub name: String,
    pub governor_id: String,
    pub alliance_id: i64,
    pub joined_at: DateTime<Utc>,
}

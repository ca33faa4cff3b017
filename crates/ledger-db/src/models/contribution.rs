//! Contribution database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for contributions table
#[derive(Debug, Clone, FromRow)]
pub struct ContributionModel {
    pub id: i64,
    pub member_id: i64,
    pub alliance_id: i64,
    pub period: i32,
    pub food: i64,
    pub wood: i64,
    pub stone: i64,
    pub gold: i64,
    pub recorded_at: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

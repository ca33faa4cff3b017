//! Test fixtures
//!
//! Directory seed data plus request/response shapes used by the API tests.

use serde::{Deserialize, Serialize};

/// Alliance with three members
pub const WOLVES: &str = "1";
/// Alliance with one member
pub const CROWS: &str = "2";

pub const ASTER: &str = "10";
pub const BRAM: &str = "11";
pub const CORA: &str = "12";
pub const DREW: &str = "20";

/// Directory loaded into every test server
pub const DIRECTORY_SEED: &str = r#"{
    "alliances": [
        { "id": "1", "name": "Grey Wolves", "tag": "WOLF", "bank_name": "wolfbank" },
        { "id": "2", "name": "Iron Crows", "tag": "CRW" }
    ],
    "members": [
        { "id": "10", "name": "Aster", "governor_id": "G-1001", "alliance_id": "1" },
        { "id": "11", "name": "Bram", "governor_id": "G-1002", "alliance_id": "1" },
        { "id": "12", "name": "Cora", "governor_id": "G-1003", "alliance_id": "1" },
        { "id": "20", "name": "Drew", "governor_id": "G-2001", "alliance_id": "2" }
    ]
}"#;

/// Body for `POST /contributions`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContributionBody {
    pub member_id: String,
    pub alliance_id: String,
    pub period: i64,
    pub food: i64,
    pub wood: i64,
    pub stone: i64,
    pub gold: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<String>,
}

impl ContributionBody {
    pub fn new(member_id: &str, alliance_id: &str, period: i64) -> Self {
        Self {
            member_id: member_id.to_string(),
            alliance_id: alliance_id.to_string(),
            period,
            ..Self::default()
        }
    }

    pub fn food(mut self, amount: i64) -> Self {
        self.food = amount;
        self
    }

    pub fn wood(mut self, amount: i64) -> Self {
        self.wood = amount;
        self
    }

    pub fn stone(mut self, amount: i64) -> Self {
        self.stone = amount;
        self
    }

    pub fn gold(mut self, amount: i64) -> Self {
        self.gold = amount;
        self
    }

    pub fn on(mut self, date: &str) -> Self {
        self.recorded_at = Some(date.to_string());
        self
    }
}

/// Stored contribution
#[derive(Debug, Deserialize)]
pub struct Contribution {
    pub id: String,
    pub member_id: String,
    pub alliance_id: String,
    pub period: u32,
    pub food: u64,
    pub wood: u64,
    pub stone: u64,
    pub gold: u64,
    pub total: u128,
    pub recorded_at: String,
}

/// Response of `POST /contributions`
///
/// The stored record's fields plus `created`. Not built on `#[serde(flatten)]`,
/// which cannot decode the `u128` total.
#[derive(Debug, Deserialize)]
pub struct Recorded {
    pub id: String,
    pub member_id: String,
    pub alliance_id: String,
    pub period: u32,
    pub food: u64,
    pub wood: u64,
    pub stone: u64,
    pub gold: u64,
    pub total: u128,
    pub recorded_at: String,
    pub created: bool,
}

#[derive(Debug, Deserialize)]
pub struct NextPeriod {
    pub member_id: String,
    pub next_period: u32,
    pub recorded_periods: Vec<u32>,
    pub period_ceiling: u32,
}

#[derive(Debug, Deserialize)]
pub struct MemberTotals {
    pub member_id: String,
    pub food: u128,
    pub wood: u128,
    pub stone: u128,
    pub gold: u128,
    pub total: u128,
    pub periods_contributed: u32,
    pub last_recorded_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AllianceTotals {
    pub alliance_id: String,
    pub name: String,
    pub tag: String,
    pub food: u128,
    pub total: u128,
    pub periods_contributed: u32,
    pub member_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub member_id: String,
    pub member_name: Option<String>,
    pub total: u128,
}

#[derive(Debug, Deserialize)]
pub struct Leaderboard {
    pub alliance_id: String,
    pub limit: u32,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Error body returned for every non-2xx response
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
    pub expected_period: Option<u32>,
}

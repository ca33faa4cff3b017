//! ContributionRecord entity <-> model mapper

use chrono::{DateTime, NaiveDate, Utc};

use ledger_core::entities::ContributionRecord;
use ledger_core::error::DomainError;
use ledger_core::value_objects::{Resources, Snowflake};

use crate::models::ContributionModel;

fn column_error(column: &str, value: impl std::fmt::Display) -> DomainError {
    DomainError::DatabaseError(format!("contributions.{column} holds out-of-range value {value}"))
}

fn counter(column: &str, value: i64) -> Result<u64, DomainError> {
    u64::try_from(value).map_err(|_| column_error(column, value))
}

/// Convert ContributionModel to ContributionRecord entity
///
/// Rows violating the table's CHECK constraints are reported as database errors.
impl TryFrom<ContributionModel> for ContributionRecord {
    type Error = DomainError;

    fn try_from(model: ContributionModel) -> Result<Self, Self::Error> {
        Ok(ContributionRecord {
            id: Snowflake::new(model.id),
            member_id: Snowflake::new(model.member_id),
            alliance_id: Snowflake::new(model.alliance_id),
            period: u32::try_from(model.period).map_err(|_| column_error("period", model.period))?,
            resources: Resources::new(
                counter("food", model.food)?,
                counter("wood", model.wood)?,
                counter("stone", model.stone)?,
                counter("gold", model.gold)?,
            ),
            recorded_at: model.recorded_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Convert ContributionRecord entity reference to values for database writes
#[derive(Debug, Clone)]
pub struct ContributionInsert {
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

impl ContributionInsert {
    pub fn new(record: &ContributionRecord) -> Result<Self, DomainError> {
        let signed = |value: u64| i64::try_from(value).map_err(|_| DomainError::ResourceOverflow);
        let resources = &record.resources;

        Ok(Self {
            id: record.id.into_inner(),
            member_id: record.member_id.into_inner(),
            alliance_id: record.alliance_id.into_inner(),
            period: i32::try_from(record.period).map_err(|_| DomainError::PeriodOutOfRange {
                period: i64::from(record.period),
                ceiling: i32::MAX as u32,
            })?,
            food: signed(resources.food)?,
            wood: signed(resources.wood)?,
            stone: signed(resources.stone)?,
            gold: signed(resources.gold)?,
            recorded_at: record.recorded_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

/// Convert a list of period column values into ascending `u32` periods
pub(crate) fn periods_from_rows(rows: Vec<i32>) -> Result<Vec<u32>, DomainError> {
    rows.into_iter()
        .map(|p| u32::try_from(p).map_err(|_| column_error("period", p)))
        .collect()
}

//! Entity to model mappers
//!
//! Conversions between domain entities (ledger-core) and database models.
//! - `TryFrom<Model> for Entity`: Convert database rows to domain objects
//! - `ContributionInsert`: Prepare entity data for database writes

mod contribution;
mod directory;

pub use contribution::ContributionInsert;
pub(crate) use contribution::periods_from_rows;

//! Value objects - immutable types that represent domain concepts

mod resources;
mod snowflake;

pub use resources::{ResourceKind, ResourceTotals, Resources};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};

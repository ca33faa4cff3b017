//! Axum extractors for request handling
//!
//! Custom extractors for validation, path and query parameters.

mod path;
mod query;
mod validated;

pub use path::{AllianceIdPath, ContributionSlotPath, MemberIdPath};
pub use query::QueryParams;
pub use validated::ValidatedJson;

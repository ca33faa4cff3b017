//! Database models - SQLx-compatible structs for PostgreSQL tables

mod contribution;
mod directory;

pub use contribution::ContributionModel;
pub use directory::{AllianceModel, MemberModel};

//! # ledger-core
//!
//! Domain layer for the alliance contribution ledger: entities, value objects,
//! the period sequencing / tax / aggregation rules, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod engine;
pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use engine::{
    alliance_totals, leaderboard, member_totals, next_eligible_period, AllianceTotals,
    CreateDecision, LeaderboardEntry, MemberTotals, PeriodSequencer, TaxEntry, TaxRate,
    TaxSession, TaxTotals, DEFAULT_PERIOD_CEILING,
};
pub use entities::{Alliance, ContributionRecord, Member};
pub use error::DomainError;
pub use traits::{ContributionFilter, ContributionRepository, MemberDirectory, RepoResult};
pub use value_objects::{
    ResourceKind, ResourceTotals, Resources, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};

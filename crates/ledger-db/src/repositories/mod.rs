//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in ledger-core.

mod contribution;
mod directory;
mod error;

pub use contribution::PgContributionRepository;
pub use directory::PgMemberDirectory;

pub(crate) use error::contribution_not_found;

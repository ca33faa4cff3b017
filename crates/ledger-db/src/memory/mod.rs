//! In-memory implementations of the repository traits
//!
//! Used by tests and by single-process deployments running with
//! `STORAGE_BACKEND=memory`. Nothing survives a restart.

mod contribution;
mod directory;

pub use contribution::MemoryContributionRepository;
pub use directory::{AllianceSeed, DirectorySeed, MemberSeed, MemoryDirectory};

//! # ledger-db
//!
//! Persistence layer implementing the ledger's repository traits.
//!
//! ## Overview
//!
//! - PostgreSQL repositories via SQLx, with the bundled schema migration
//! - In-memory repositories for tests and single-process deployments
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledger_common::AppConfig;
//! use ledger_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use ledger_db::repositories::PgContributionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let database = config.database.as_ref().ok_or("DATABASE_URL is not set")?;
//!     let pool = create_pool(&DatabaseConfig::from(database)).await?;
//!     run_migrations(&pool).await?;
//!     let contributions = PgContributionRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{DirectorySeed, MemoryContributionRepository, MemoryDirectory};
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgContributionRepository, PgMemberDirectory};

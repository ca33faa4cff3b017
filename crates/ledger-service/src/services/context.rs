//! Service context - dependency container for services
//!
//! Holds the repositories, ledger rules and id generator needed by services.

use std::sync::Arc;

use ledger_core::engine::PeriodSequencer;
use ledger_core::traits::{ContributionRepository, MemberDirectory};
use ledger_core::{Snowflake, SnowflakeGenerator};

use super::error::{ServiceError, ServiceResult};

/// Default leaderboard size when the caller gives none
pub const DEFAULT_LEADERBOARD_LIMIT: u32 = 10;

/// Largest leaderboard a caller may request
pub const MAX_LEADERBOARD_LIMIT: u32 = 100;

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency is shared.
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    contribution_repo: Arc<dyn ContributionRepository>,
    directory: Arc<dyn MemberDirectory>,

    // Ledger rules
    sequencer: PeriodSequencer,
    leaderboard_limit: u32,

    // Services
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        contribution_repo: Arc<dyn ContributionRepository>,
        directory: Arc<dyn MemberDirectory>,
        sequencer: PeriodSequencer,
        leaderboard_limit: u32,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        Self {
            contribution_repo,
            directory,
            sequencer,
            leaderboard_limit: leaderboard_limit.clamp(1, MAX_LEADERBOARD_LIMIT),
            snowflake_generator,
        }
    }

    // === Repositories ===

    /// Get the contribution repository
    pub fn contribution_repo(&self) -> &dyn ContributionRepository {
        self.contribution_repo.as_ref()
    }

    /// Get the member directory
    pub fn directory(&self) -> &dyn MemberDirectory {
        self.directory.as_ref()
    }

    // === Ledger Rules ===

    pub fn sequencer(&self) -> &PeriodSequencer {
        &self.sequencer
    }

    pub fn leaderboard_limit(&self) -> u32 {
        self.leaderboard_limit
    }

    // === Services ===

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("sequencer", &self.sequencer)
            .field("leaderboard_limit", &self.leaderboard_limit)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    contribution_repo: Option<Arc<dyn ContributionRepository>>,
    directory: Option<Arc<dyn MemberDirectory>>,
    sequencer: Option<PeriodSequencer>,
    leaderboard_limit: Option<u32>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contribution_repo(mut self, repo: Arc<dyn ContributionRepository>) -> Self {
        self.contribution_repo = Some(repo);
        self
    }

    pub fn directory(mut self, directory: Arc<dyn MemberDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn sequencer(mut self, sequencer: PeriodSequencer) -> Self {
        self.sequencer = Some(sequencer);
        self
    }

    pub fn leaderboard_limit(mut self, limit: u32) -> Self {
        self.leaderboard_limit = Some(limit);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// The sequencer, leaderboard limit and id generator fall back to defaults.
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if a repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let snowflake_generator = match self.snowflake_generator {
            Some(generator) => generator,
            None => Arc::new(SnowflakeGenerator::new(0)?),
        };

        Ok(ServiceContext::new(
            self.contribution_repo
                .ok_or_else(|| ServiceError::validation("contribution_repo is required"))?,
            self.directory
                .ok_or_else(|| ServiceError::validation("directory is required"))?,
            self.sequencer.unwrap_or_default(),
            self.leaderboard_limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT),
            snowflake_generator,
        ))
    }
}

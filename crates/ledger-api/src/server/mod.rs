//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::sync::Arc;

use axum::Router;
use ledger_common::{AppConfig, AppError, AppResult, StorageBackend};
use ledger_core::engine::PeriodSequencer;
use ledger_core::traits::{ContributionRepository, MemberDirectory};
use ledger_core::SnowflakeGenerator;
use ledger_db::{
    create_pool, run_migrations, DirectorySeed, MemoryContributionRepository, MemoryDirectory,
    PgContributionRepository, PgMemberDirectory,
};
use ledger_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// API routes are rate limited; health routes are not.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );
    let health = apply_middleware(health_routes());

    api.merge(health).with_state(state)
}

/// Initialize all dependencies and create AppState
///
/// The storage backend decides where contributions and the directory live.
pub async fn create_app_state(config: AppConfig) -> AppResult<AppState> {
    match config.storage {
        StorageBackend::Postgres => postgres_app_state(config).await,
        StorageBackend::Memory => {
            let directory = match &config.directory.seed_path {
                Some(path) => {
                    info!(path = %path, "Loading directory seed");
                    MemoryDirectory::from_seed(DirectorySeed::from_file(path)?)?
                }
                None => MemoryDirectory::new(),
            };
            memory_app_state(config, directory)
        }
    }
}

/// Create AppState backed by in-memory storage and the given directory
pub fn memory_app_state(config: AppConfig, directory: MemoryDirectory) -> AppResult<AppState> {
    info!("Using in-memory contribution store");
    build_state(
        config,
        Arc::new(MemoryContributionRepository::new()),
        Arc::new(directory),
    )
}

async fn postgres_app_state(config: AppConfig) -> AppResult<AppState> {
    let database = config.database.as_ref().ok_or_else(|| {
        AppError::Config("DATABASE_URL is required for the postgres storage backend".to_string())
    })?;

    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&ledger_db::DatabaseConfig::from(database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if database.run_migrations {
        run_migrations(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let contribution_repo = Arc::new(PgContributionRepository::new(pool.clone()));
    let directory = Arc::new(PgMemberDirectory::new(pool));
    build_state(config, contribution_repo, directory)
}

fn build_state(
    config: AppConfig,
    contribution_repo: Arc<dyn ContributionRepository>,
    directory: Arc<dyn MemberDirectory>,
) -> AppResult<AppState> {
    let snowflake_generator = SnowflakeGenerator::new(config.snowflake.worker_id)
        .map_err(|e| AppError::Config(e.to_string()))?;

    let service_context = ServiceContextBuilder::new()
        .contribution_repo(contribution_repo)
        .directory(directory)
        .sequencer(PeriodSequencer::new(config.ledger.period_ceiling))
        .leaderboard_limit(config.ledger.leaderboard_limit)
        .snowflake_generator(Arc::new(snowflake_generator))
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: &str) -> AppResult<()> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    let local_addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read bound address: {e}")))?;
    info!("Server listening on http://{}", local_addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let addr = config.api.address();

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, &addr).await
}

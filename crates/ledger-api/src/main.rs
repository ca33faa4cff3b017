//! Contribution ledger API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p ledger-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use ledger_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first: the environment decides the log format
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        storage = ?config.storage,
        port = config.api.port,
        "Starting contribution ledger API"
    );

    if let Err(e) = ledger_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

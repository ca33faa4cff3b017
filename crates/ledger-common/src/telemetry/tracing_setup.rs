//! Tracing and logging setup
//!
//! `RUST_LOG` wins when set; otherwise the ledger crates log at the configured
//! level and noisy dependencies are held at `warn`.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::config::Environment;

/// Dependencies whose info-level output drowns out request logs
const QUIET_TARGETS: [&str; 3] = ["sqlx", "hyper", "tower_governor"];

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level for the ledger crates when `RUST_LOG` is not set
    pub level: Level,
    /// Emit one JSON object per event
    pub json: bool,
    /// Log span open/close (shows `#[instrument]` timings)
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
    pub thread_names: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Development)
    }
}

impl TracingConfig {
    /// Preset for the deployment environment
    ///
    /// Development logs pretty text at debug with span timings; staging and
    /// production log JSON, staging at debug.
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: Level::DEBUG,
                json: false,
                span_events: true,
                file_line: true,
                thread_names: true,
            },
            Environment::Staging => Self {
                level: Level::DEBUG,
                ..Self::for_environment(Environment::Production)
            },
            Environment::Production => Self {
                level: Level::INFO,
                json: true,
                span_events: false,
                file_line: false,
                thread_names: false,
            },
        }
    }

    /// Filter used when `RUST_LOG` is absent
    pub fn default_directives(&self) -> String {
        let mut directives = self.level.to_string().to_lowercase();
        for target in QUIET_TARGETS {
            directives.push_str(&format!(",{target}=warn"));
        }
        directives
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Install the global subscriber
///
/// Fails instead of panicking when a subscriber is already installed, so
/// tests and embedders can call it freely.
pub fn try_init_tracing_with_config(config: TracingConfig) -> Result<(), TracingError> {
    build_and_init(&config).map_err(|_| TracingError::AlreadyInitialized)
}

fn build_and_init(config: &TracingConfig) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directives()));

    // Exactly one of the two formatting layers is active
    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_thread_names(config.thread_names)
            .with_span_events(config.span_events())
    });
    let pretty_layer = (!config.json).then(|| {
        fmt::layer()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_thread_names(config.thread_names)
            .with_span_events(config.span_events())
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}

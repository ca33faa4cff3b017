//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, DirectoryConfig,
    Environment, LedgerConfig, RateLimitConfig, ServerConfig, SnowflakeConfig, StorageBackend,
};

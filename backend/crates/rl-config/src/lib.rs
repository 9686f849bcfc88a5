mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod notification_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use notification_config::NotificationConfig;

const CONFIG_DIR_ENV: &str = "RL_CONFIG_DIR";
const DEFAULT_CONFIG_DIRECTORY: &str = ".rl";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_DATABASE_FILENAME: &str = "identities.db";

const DEFAULT_TOKEN_ISSUER: &str = "reading-log";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
const MIN_SIGNING_KEY_LENGTH: usize = 32;
const MAX_TOKEN_TTL_HOURS: i64 = 8760;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
const DEFAULT_LOG_DIRECTORY: &str = "log";

const DEFAULT_NOTIFICATION_INTERVAL_DAYS: u32 = 7;

#[cfg(test)]
mod tests;

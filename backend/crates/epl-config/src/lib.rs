mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod rate_limit_config;
mod server_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use rate_limit_config::RateLimitConfig;
pub use server_config::ServerConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 4000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "epl.db";
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 25;
const MIN_DATABASE_MAX_CONNECTIONS: u32 = 1;
const MAX_DATABASE_MAX_CONNECTIONS: u32 = 100;
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 3;
const MIN_QUERY_TIMEOUT_SECS: u64 = 1;
const MAX_QUERY_TIMEOUT_SECS: u64 = 60;

const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
const DEFAULT_ACTIVATION_TOKEN_TTL_HOURS: i64 = 72;
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;
const DEFAULT_REQUIRE_ACTIVATION: bool = false;
const DEFAULT_BCRYPT_COST: u32 = 12;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;
const DEFAULT_PERMISSIONS: [&str; 2] = ["teams:read", "comments:read"];

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";

#[cfg(test)]
mod tests;

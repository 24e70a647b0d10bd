use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, LoggingConfig, RateLimitConfig,
    ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

const CONFIG_DIR_ENV: &str = "EPL_CONFIG_DIR";
const CONFIG_DIR_DEFAULT: &str = ".epl";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. EPL_CONFIG_DIR env var, else ./.epl/
    /// 2. Create the config directory if missing
    /// 3. Parse config.toml if present, else defaults
    /// 4. Apply EPL_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: EPL_CONFIG_DIR env var > ./.epl/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(CONFIG_DIR_DEFAULT))
    }

    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.rate_limit.validate()?;

        Ok(())
    }

    /// Absolute path to the database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Absolute path to the log file, when file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let Some(file) = &self.logging.file else {
            return Ok(None);
        };
        Ok(Some(Self::config_dir()?.join(&self.logging.dir).join(file)))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  database: {} (max {} connections, {}s query timeout)",
            self.database.path, self.database.max_connections, self.database.query_timeout_secs
        );
        info!(
            "  auth: token_ttl={}h, activation_ttl={}h, require_activation={}, bcrypt_cost={}",
            self.auth.token_ttl_hours,
            self.auth.activation_token_ttl_hours,
            self.auth.require_activation,
            self.auth.bcrypt_cost
        );
        info!(
            "  auth: default permissions [{}]",
            self.auth.default_permissions.join(", ")
        );

        if self.rate_limit.enabled {
            info!(
                "  rate_limit: {} logins/{}s per email",
                self.rate_limit.max_attempts, self.rate_limit.window_secs
            );
        } else {
            info!("  rate_limit: disabled");
        }

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("EPL_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("EPL_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("EPL_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "EPL_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );
        Self::apply_env_parse(
            "EPL_DATABASE_QUERY_TIMEOUT_SECS",
            &mut self.database.query_timeout_secs,
        );

        // Auth
        Self::apply_env_parse("EPL_AUTH_TOKEN_TTL_HOURS", &mut self.auth.token_ttl_hours);
        Self::apply_env_parse(
            "EPL_AUTH_ACTIVATION_TOKEN_TTL_HOURS",
            &mut self.auth.activation_token_ttl_hours,
        );
        Self::apply_env_bool(
            "EPL_AUTH_REQUIRE_ACTIVATION",
            &mut self.auth.require_activation,
        );
        Self::apply_env_parse("EPL_AUTH_BCRYPT_COST", &mut self.auth.bcrypt_cost);
        Self::apply_env_list(
            "EPL_AUTH_DEFAULT_PERMISSIONS",
            &mut self.auth.default_permissions,
        );

        // Rate limit
        Self::apply_env_bool("EPL_RATE_LIMIT_ENABLED", &mut self.rate_limit.enabled);
        Self::apply_env_parse(
            "EPL_RATE_LIMIT_MAX_ATTEMPTS",
            &mut self.rate_limit.max_attempts,
        );
        Self::apply_env_parse(
            "EPL_RATE_LIMIT_WINDOW_SECS",
            &mut self.rate_limit.window_secs,
        );

        // Logging
        Self::apply_env_parse("EPL_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("EPL_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_string("EPL_LOG_DIR", &mut self.logging.dir);
        Self::apply_env_option_string("EPL_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: Comma-separated list; an empty value clears the list
    fn apply_env_list(var_name: &str, target: &mut Vec<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect();
        }
    }
}

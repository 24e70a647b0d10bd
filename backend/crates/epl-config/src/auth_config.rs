use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ACTIVATION_TOKEN_TTL_HOURS, DEFAULT_BCRYPT_COST,
    DEFAULT_PERMISSIONS, DEFAULT_REQUIRE_ACTIVATION, DEFAULT_TOKEN_TTL_HOURS, MAX_BCRYPT_COST,
    MAX_TOKEN_TTL_HOURS, MIN_BCRYPT_COST,
};

use serde::Deserialize;

/// Credential and token policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Lifetime of login tokens
    pub token_ttl_hours: i64,
    pub activation_token_ttl_hours: i64,
    /// Refuse login for accounts that have not been activated
    pub require_activation: bool,
    pub bcrypt_cost: u32,
    /// Permission codes granted to every new registration
    pub default_permissions: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
            activation_token_ttl_hours: DEFAULT_ACTIVATION_TOKEN_TTL_HOURS,
            require_activation: DEFAULT_REQUIRE_ACTIVATION,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            default_permissions: DEFAULT_PERMISSIONS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for (name, hours) in [
            ("token_ttl_hours", self.token_ttl_hours),
            ("activation_token_ttl_hours", self.activation_token_ttl_hours),
        ] {
            if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
                return Err(ConfigError::auth(format!(
                    "auth.{} must be 1-{}, got {}",
                    name, MAX_TOKEN_TTL_HOURS, hours
                )));
            }
        }

        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::auth(format!(
                "auth.bcrypt_cost must be {}-{}, got {}",
                MIN_BCRYPT_COST, MAX_BCRYPT_COST, self.bcrypt_cost
            )));
        }

        if let Some(code) = self
            .default_permissions
            .iter()
            .find(|code| code.trim().is_empty())
        {
            return Err(ConfigError::auth(format!(
                "auth.default_permissions contains a blank code: {:?}",
                code
            )));
        }

        Ok(())
    }
}

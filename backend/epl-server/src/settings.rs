//! Translation from file/env configuration into the library policy types.

use epl_auth::{AuthSettings, RateLimitConfig};
use epl_config::Config;

use chrono::TimeDelta;

pub fn auth_settings(config: &Config) -> AuthSettings {
    let rate_limit = config.rate_limit.enabled.then(|| RateLimitConfig {
        max_attempts: config.rate_limit.max_attempts,
        window_secs: config.rate_limit.window_secs,
    });

    AuthSettings {
        token_ttl: TimeDelta::hours(config.auth.token_ttl_hours),
        activation_token_ttl: TimeDelta::hours(config.auth.activation_token_ttl_hours),
        require_activation: config.auth.require_activation,
        bcrypt_cost: config.auth.bcrypt_cost,
        default_permissions: config.auth.default_permissions.clone(),
        rate_limit,
    }
}

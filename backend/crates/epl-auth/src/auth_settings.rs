use crate::RateLimitConfig;

use chrono::TimeDelta;

/// Policy knobs for [`crate::AuthService`].
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Lifetime of `authentication` tokens
    pub token_ttl: TimeDelta,
    /// Lifetime of `activation` tokens
    pub activation_token_ttl: TimeDelta,
    /// Refuse login and authorization for identities not yet activated
    pub require_activation: bool,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Codes granted to every new registration
    pub default_permissions: Vec<String>,
    /// `None` disables login throttling
    pub rate_limit: Option<RateLimitConfig>,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            token_ttl: TimeDelta::hours(24),
            activation_token_ttl: TimeDelta::hours(72),
            require_activation: false,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            default_permissions: vec!["teams:read".to_string(), "comments:read".to_string()],
            rate_limit: Some(RateLimitConfig::default()),
        }
    }
}

pub mod auth_service;
pub mod auth_settings;
pub mod bearer;
pub mod error;
pub mod login_rate_limiter;
pub mod password_hasher;
pub mod profile_update;
pub mod rate_limit_config;
pub mod token_generator;
pub mod token_issuer;

pub use auth_service::AuthService;
pub use auth_settings::AuthSettings;
pub use bearer::parse_bearer;
pub use error::{AuthError, Result};
pub use login_rate_limiter::LoginRateLimiter;
pub use password_hasher::{MIN_BCRYPT_COST, PasswordHasher};
pub use profile_update::ProfileUpdate;
pub use rate_limit_config::RateLimitConfig;
pub use token_issuer::TokenIssuer;

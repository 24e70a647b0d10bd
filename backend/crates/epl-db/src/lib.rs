pub mod connection;
pub mod error;
pub mod repositories;

mod bounded;

pub use connection::database::{Database, DbTransaction};
pub use error::{DbError, Result};
pub use repositories::permission_repository::PermissionRepository;
pub use repositories::token_repository::TokenRepository;
pub use repositories::user_repository::UserRepository;

/// Per-statement deadline used when none is configured.
pub const DEFAULT_QUERY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(3);

pub mod error;
pub mod models;
pub mod validation;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::auth_subject::AuthSubject;
pub use models::identity::Identity;
pub use models::new_identity::NewIdentity;
pub use models::password_hash::PasswordHash;
pub use models::permissions::Permissions;
pub use models::token::Token;
pub use models::token_hash::TokenHash;
pub use models::token_scope::TokenScope;

/// Printable length of every issued token plaintext (16 random bytes, unpadded base32).
pub const TOKEN_PLAINTEXT_LENGTH: usize = 26;
/// Random bytes drawn per token.
pub const TOKEN_ENTROPY_BYTES: usize = 16;

#[cfg(test)]
mod tests;

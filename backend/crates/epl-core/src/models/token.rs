use crate::{TokenHash, TokenScope};

use std::fmt;

use chrono::{DateTime, Utc};

/// A freshly issued bearer token.
///
/// `plaintext` exists only in this value, handed to the client once at
/// issuance. The store keeps `hash`, `user_id`, `expiry` and `scope`.
#[derive(Clone)]
pub struct Token {
    pub plaintext: String,
    pub hash: TokenHash,
    pub user_id: i64,
    pub expiry: DateTime<Utc>,
    pub scope: TokenScope,
}

impl Token {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry <= now
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("plaintext", &"<redacted>")
            .field("hash", &self.hash)
            .field("user_id", &self.user_id)
            .field("expiry", &self.expiry)
            .field("scope", &self.scope)
            .finish()
    }
}

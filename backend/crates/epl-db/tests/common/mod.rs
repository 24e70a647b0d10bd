#![allow(dead_code)]

use epl_core::{Identity, NewIdentity, PasswordHash, Token, TokenHash, TokenScope};
use epl_db::{Database, UserRepository};

use std::time::Duration;

use chrono::{TimeDelta, Utc};

/// Creates an in-memory database with migrations run
pub async fn create_test_db() -> Database {
    Database::in_memory(Duration::from_secs(3))
        .await
        .expect("Failed to create test database")
}

/// A new identity with a stand-in hash; repository tests never verify passwords
pub fn new_identity(name: &str, email: &str) -> NewIdentity {
    NewIdentity::new(name, email, PasswordHash::from_bytes(format!("$2b$04$stub-{email}").into_bytes()))
}

/// Inserts a user and returns the stored identity
pub async fn create_test_user(db: &Database, email: &str) -> Identity {
    UserRepository::new(db.clone())
        .insert(&new_identity("Test User", email))
        .await
        .expect("Failed to create test user")
}

/// Builds a token for `user_id` with a fixed plaintext and the given lifetime
pub fn create_test_token(
    plaintext: &str,
    user_id: i64,
    scope: TokenScope,
    ttl: TimeDelta,
) -> Token {
    Token {
        plaintext: plaintext.to_string(),
        hash: TokenHash::of(plaintext),
        user_id,
        expiry: Utc::now() + ttl,
        scope,
    }
}

//! Persisted identity record.

use crate::PasswordHash;

use chrono::{DateTime, Utc};

/// A stored user identity.
///
/// `version` is the optimistic-concurrency token: an update is only accepted
/// by the store when the value held here still matches the stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub activated: bool,
    pub version: i32,
}

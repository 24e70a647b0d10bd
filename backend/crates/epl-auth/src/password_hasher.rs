use crate::{AuthError, Result as AuthErrorResult};

use epl_core::PasswordHash;

/// Lowest work factor bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;

/// bcrypt hashing with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Salted one-way hash of `plaintext`.
    #[track_caller]
    pub fn hash(&self, plaintext: &str) -> AuthErrorResult<PasswordHash> {
        bcrypt::hash(plaintext, self.cost)
            .map(|hash| PasswordHash::from_bytes(hash.into_bytes()))
            .map_err(|e| AuthError::hashing(format!("Failed to hash password: {}", e)))
    }

    /// `Ok(false)` on mismatch. Errors only when the stored hash is unreadable.
    #[track_caller]
    pub fn verify(&self, hash: &PasswordHash, plaintext: &str) -> AuthErrorResult<bool> {
        let stored = std::str::from_utf8(hash.as_bytes())
            .map_err(|_| AuthError::hashing("Stored password hash is not valid UTF-8"))?;

        bcrypt::verify(plaintext, stored)
            .map_err(|e| AuthError::hashing(format!("Stored password hash is malformed: {}", e)))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

use crate::Result as AuthErrorResult;
use crate::token_generator::{is_well_formed, new_token};

use epl_core::{ErrorLocation, Identity, Token, TokenScope};
use epl_db::{Database, DbError, DbTransaction, TokenRepository, UserRepository};

use std::panic::Location;

use chrono::{TimeDelta, Utc};

/// Mints, resolves and revokes opaque bearer tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    tokens: TokenRepository,
    users: UserRepository,
}

impl TokenIssuer {
    pub fn new(db: Database) -> Self {
        Self {
            tokens: TokenRepository::new(db.clone()),
            users: UserRepository::new(db),
        }
    }

    /// Generate and persist a token. The returned value is the only place the
    /// plaintext ever exists.
    pub async fn issue(
        &self,
        user_id: i64,
        ttl: TimeDelta,
        scope: TokenScope,
    ) -> AuthErrorResult<Token> {
        let token = new_token(user_id, ttl, scope);
        self.tokens.insert(&token).await?;

        log::info!(
            "Issued {} token for user {} (expires {})",
            scope,
            user_id,
            token.expiry.to_rfc3339()
        );

        Ok(token)
    }

    /// Identity owning a live `scope` token with this plaintext.
    ///
    /// Unknown, expired, wrong-scope and malformed tokens all fail with the
    /// same `NotFound`.
    pub async fn resolve(&self, scope: TokenScope, plaintext: &str) -> AuthErrorResult<Identity> {
        if !is_well_formed(plaintext) {
            return Err(DbError::NotFound {
                location: ErrorLocation::from(Location::caller()),
            }
            .into());
        }

        Ok(self.users.get_for_token(scope, plaintext).await?)
    }

    pub async fn revoke_all(&self, scope: TokenScope, user_id: i64) -> AuthErrorResult<u64> {
        let removed = self.tokens.delete_all_for_user(scope, user_id).await?;
        log::info!("Revoked {} {} token(s) for user {}", removed, scope, user_id);
        Ok(removed)
    }

    /// [`Self::revoke_all`] as part of the caller's transaction.
    pub async fn revoke_all_in(
        &self,
        tx: &mut DbTransaction,
        scope: TokenScope,
        user_id: i64,
    ) -> AuthErrorResult<u64> {
        let removed = self
            .tokens
            .delete_all_for_user_with(&mut **tx, scope, user_id)
            .await?;
        log::debug!("Revoking {} {} token(s) for user {}", removed, scope, user_id);
        Ok(removed)
    }

    /// Delete rows whose expiry has passed.
    pub async fn reap_expired(&self) -> AuthErrorResult<u64> {
        let removed = self.tokens.delete_expired(Utc::now()).await?;
        if removed > 0 {
            log::debug!("Reaped {} expired token(s)", removed);
        }
        Ok(removed)
    }
}

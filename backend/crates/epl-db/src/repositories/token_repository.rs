use crate::bounded::bounded;
use crate::{Database, Result as DbErrorResult};

use epl_core::{Token, TokenScope};

use chrono::{DateTime, Utc};

/// Persists token digests. The plaintext never reaches this layer's SQL.
#[derive(Clone)]
pub struct TokenRepository {
    db: Database,
}

impl TokenRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn insert(&self, token: &Token) -> DbErrorResult<()> {
        bounded(self.db.query_timeout(), async {
            sqlx::query(
                r#"
                  INSERT INTO tokens (hash, user_id, expiry, scope)
                  VALUES (?, ?, ?, ?)
                  "#,
            )
            .bind(&token.hash.as_bytes()[..])
            .bind(token.user_id)
            .bind(token.expiry.timestamp())
            .bind(token.scope.as_str())
            .execute(self.db.pool())
            .await?;

            Ok(())
        })
        .await
    }

    /// Delete every token of `scope` owned by `user_id`. Returns the number removed.
    pub async fn delete_all_for_user(&self, scope: TokenScope, user_id: i64) -> DbErrorResult<u64> {
        self.delete_all_for_user_with(self.db.pool(), scope, user_id)
            .await
    }

    pub async fn delete_all_for_user_with<'e, E>(
        &self,
        executor: E,
        scope: TokenScope,
        user_id: i64,
    ) -> DbErrorResult<u64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        bounded(self.db.query_timeout(), async {
            let result = sqlx::query(
                r#"
                  DELETE FROM tokens
                  WHERE scope = ? AND user_id = ?
                  "#,
            )
            .bind(scope.as_str())
            .bind(user_id)
            .execute(executor)
            .await?;

            Ok(result.rows_affected())
        })
        .await
    }

    /// Reap rows whose expiry is at or before `now`.
    pub async fn delete_expired(&self, now: DateTime<Utc>) -> DbErrorResult<u64> {
        bounded(self.db.query_timeout(), async {
            let result = sqlx::query("DELETE FROM tokens WHERE expiry <= ?")
                .bind(now.timestamp())
                .execute(self.db.pool())
                .await?;

            Ok(result.rows_affected())
        })
        .await
    }
}

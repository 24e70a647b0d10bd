use crate::bounded::bounded;
use crate::{Database, Result as DbErrorResult};

use epl_core::Permissions;

use sqlx::{QueryBuilder, Sqlite};

/// Grants between users and the permission definitions seeded by migration.
#[derive(Clone)]
pub struct PermissionRepository {
    db: Database,
}

impl PermissionRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All codes granted to `user_id`. A user with no grants gets an empty set.
    pub async fn get_all_for_user(&self, user_id: i64) -> DbErrorResult<Permissions> {
        bounded(self.db.query_timeout(), async {
            let codes: Vec<String> = sqlx::query_scalar(
                r#"
                  SELECT permissions.code
                  FROM permissions
                  INNER JOIN users_permissions ON users_permissions.permission_id = permissions.id
                  WHERE users_permissions.user_id = ?
                  "#,
            )
            .bind(user_id)
            .fetch_all(self.db.pool())
            .await?;

            Ok(codes.into_iter().collect())
        })
        .await
    }

    /// Grant each code that matches a known definition. Unknown codes are
    /// dropped and already-held grants are left alone. Returns the number of
    /// grants actually added.
    pub async fn add_for_user<S: AsRef<str>>(&self, user_id: i64, codes: &[S]) -> DbErrorResult<u64> {
        self.add_for_user_with(self.db.pool(), user_id, codes).await
    }

    /// [`Self::add_for_user`] on a caller-supplied executor, e.g. `&mut *tx`.
    pub async fn add_for_user_with<'e, E, S>(
        &self,
        executor: E,
        user_id: i64,
        codes: &[S],
    ) -> DbErrorResult<u64>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
        S: AsRef<str>,
    {
        if codes.is_empty() {
            return Ok(0);
        }

        bounded(self.db.query_timeout(), async {
            let mut builder = QueryBuilder::<Sqlite>::new(
                "INSERT OR IGNORE INTO users_permissions (user_id, permission_id) SELECT ",
            );
            builder.push_bind(user_id);
            builder.push(", permissions.id FROM permissions WHERE permissions.code IN (");
            let mut separated = builder.separated(", ");
            for code in codes {
                separated.push_bind(code.as_ref().to_string());
            }
            separated.push_unseparated(")");

            let result = builder.build().execute(executor).await?;
            let added = result.rows_affected();

            if (added as usize) < codes.len() {
                log::debug!(
                    "Granted {} of {} requested permissions to user {}",
                    added,
                    codes.len(),
                    user_id
                );
            }

            Ok(added)
        })
        .await
    }

    /// Revoke the given codes from `user_id`. Returns the number of grants removed.
    pub async fn remove_for_user<S: AsRef<str>>(
        &self,
        user_id: i64,
        codes: &[S],
    ) -> DbErrorResult<u64> {
        if codes.is_empty() {
            return Ok(0);
        }

        bounded(self.db.query_timeout(), async {
            let mut builder = QueryBuilder::<Sqlite>::new(
                "DELETE FROM users_permissions WHERE user_id = ",
            );
            builder.push_bind(user_id);
            builder.push(" AND permission_id IN (SELECT id FROM permissions WHERE code IN (");
            let mut separated = builder.separated(", ");
            for code in codes {
                separated.push_bind(code.as_ref().to_string());
            }
            separated.push_unseparated("))");

            let result = builder.build().execute(self.db.pool()).await?;
            Ok(result.rows_affected())
        })
        .await
    }
}

use crate::bounded::bounded;
use crate::{Database, DbError, Result as DbErrorResult};

use epl_core::{ErrorLocation, Identity, NewIdentity, PasswordHash, TokenHash, TokenScope};

use std::panic::Location;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

const USER_COLUMNS: &str = "users.id AS id, users.created_at AS created_at, users.name AS name, \
     users.email AS email, users.password_hash AS password_hash, users.activated AS activated, \
     users.version AS version";

#[derive(FromRow)]
struct UserRow {
    id: i64,
    created_at: i64,
    name: String,
    email: String,
    password_hash: Vec<u8>,
    activated: bool,
    version: i32,
}

impl TryFrom<UserRow> for Identity {
    type Error = DbError;

    #[track_caller]
    fn try_from(row: UserRow) -> DbErrorResult<Self> {
        if row.password_hash.is_empty() {
            return Err(DbError::corrupt("users", format!("user {} has no password hash", row.id)));
        }
        Ok(Identity {
            id: row.id,
            created_at: timestamp(row.created_at)?,
            name: row.name,
            email: row.email,
            password_hash: PasswordHash::from_bytes(row.password_hash),
            activated: row.activated,
            version: row.version,
        })
    }
}

#[track_caller]
fn timestamp(secs: i64) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::corrupt("users", format!("invalid created_at {}", secs)))
}

/// Owns identity rows: uniqueness on email and version-checked updates.
#[derive(Clone)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persist a new identity. The store assigns `id`, `created_at` and `version = 1`.
    pub async fn insert(&self, user: &NewIdentity) -> DbErrorResult<Identity> {
        self.insert_with(self.db.pool(), user).await
    }

    /// [`Self::insert`] on a caller-supplied executor, e.g. `&mut *tx`.
    pub async fn insert_with<'e, E>(&self, executor: E, user: &NewIdentity) -> DbErrorResult<Identity>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        bounded(self.db.query_timeout(), async {
            let created_at = Utc::now().timestamp();

            let (id, created_at, version): (i64, i64, i32) = sqlx::query_as(
                r#"
                  INSERT INTO users (created_at, name, email, password_hash, activated)
                  VALUES (?, ?, ?, ?, ?)
                  RETURNING id, created_at, version
                  "#,
            )
            .bind(created_at)
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.password_hash.as_bytes())
            .bind(user.activated)
            .fetch_one(executor)
            .await
            .map_err(DbError::from_write)?;

            log::debug!("Inserted user {}", id);

            Ok(Identity {
                id,
                created_at: timestamp(created_at)?,
                name: user.name.clone(),
                email: user.email.clone(),
                password_hash: user.password_hash.clone(),
                activated: user.activated,
                version,
            })
        })
        .await
    }

    pub async fn get_by_email(&self, email: &str) -> DbErrorResult<Identity> {
        bounded(self.db.query_timeout(), async {
            let query = format!("SELECT {USER_COLUMNS} FROM users WHERE users.email = ?");
            let row: Option<UserRow> = sqlx::query_as(&query)
                .bind(email)
                .fetch_optional(self.db.pool())
                .await?;

            row.map(Identity::try_from)
                .transpose()?
                .ok_or_else(not_found)
        })
        .await
    }

    pub async fn get_by_id(&self, id: i64) -> DbErrorResult<Identity> {
        bounded(self.db.query_timeout(), async {
            let query = format!("SELECT {USER_COLUMNS} FROM users WHERE users.id = ?");
            let row: Option<UserRow> = sqlx::query_as(&query)
                .bind(id)
                .fetch_optional(self.db.pool())
                .await?;

            row.map(Identity::try_from)
                .transpose()?
                .ok_or_else(not_found)
        })
        .await
    }

    /// Compare-and-swap update keyed on `user.version`.
    ///
    /// On success `user.version` is advanced to the stored value. When the row's
    /// version no longer matches (or the row is gone) nothing is written and
    /// `EditConflict` is returned.
    pub async fn update(&self, user: &mut Identity) -> DbErrorResult<()> {
        self.update_with(self.db.pool(), user).await
    }

    /// [`Self::update`] on a caller-supplied executor. Inside a transaction the
    /// advanced `user.version` only holds once the transaction commits.
    pub async fn update_with<'e, E>(&self, executor: E, user: &mut Identity) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let new_version = bounded(self.db.query_timeout(), async {
            let version: Option<i32> = sqlx::query_scalar(
                r#"
                  UPDATE users
                  SET name = ?, email = ?, password_hash = ?, activated = ?, version = version + 1
                  WHERE id = ? AND version = ?
                  RETURNING version
                  "#,
            )
            .bind(&user.name)
            .bind(&user.email)
            .bind(user.password_hash.as_bytes())
            .bind(user.activated)
            .bind(user.id)
            .bind(user.version)
            .fetch_optional(executor)
            .await
            .map_err(DbError::from_write)?;

            version.ok_or_else(|| {
                log::info!("Edit conflict updating user {} at version {}", user.id, user.version);
                DbError::EditConflict {
                    location: ErrorLocation::from(Location::caller()),
                }
            })
        })
        .await?;

        user.version = new_version;
        Ok(())
    }

    /// Identity owning a live token with this plaintext and scope.
    ///
    /// Unknown, expired and wrong-scope tokens all yield `NotFound`.
    pub async fn get_for_token(
        &self,
        scope: TokenScope,
        plaintext: &str,
    ) -> DbErrorResult<Identity> {
        let hash = TokenHash::of(plaintext);

        bounded(self.db.query_timeout(), async {
            let query = format!(
                r#"
                  SELECT {USER_COLUMNS}
                  FROM users
                  INNER JOIN tokens ON tokens.user_id = users.id
                  WHERE tokens.hash = ? AND tokens.scope = ? AND tokens.expiry > ?
                  "#
            );
            let row: Option<UserRow> = sqlx::query_as(&query)
                .bind(&hash.as_bytes()[..])
                .bind(scope.as_str())
                .bind(Utc::now().timestamp())
                .fetch_optional(self.db.pool())
                .await?;

            row.map(Identity::try_from)
                .transpose()?
                .ok_or_else(not_found)
        })
        .await
    }
}

#[track_caller]
fn not_found() -> DbError {
    DbError::NotFound {
        location: ErrorLocation::from(Location::caller()),
    }
}

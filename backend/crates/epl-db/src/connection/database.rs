use crate::bounded::bounded;
use crate::{DbError, Result};

use epl_core::ErrorLocation;

use std::panic::Location;
use std::path::Path;
use std::time::Duration;

use sqlx::Sqlite;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

/// An open transaction on the pool. Dropping it without [`Database::commit`] rolls back.
pub type DbTransaction = sqlx::Transaction<'static, Sqlite>;

/// Shared handle to the backing store.
///
/// Created once at startup and cloned into every repository. Cloning shares
/// the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    query_timeout: Duration,
}

impl Database {
    /// Open (creating if missing) the database file and apply migrations.
    pub async fn connect(
        path: impl AsRef<Path>,
        max_connections: u32,
        query_timeout: Duration,
    ) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| DbError::Initialization {
                    message: format!("Failed to create database directory: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(query_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(query_timeout)
            .connect_with(options)
            .await?;

        let database = Self::from_pool(pool, query_timeout);
        database.run_migrations().await?;

        log::info!("Database ready: {}", path.display());

        Ok(database)
    }

    /// Private in-memory database with migrations applied.
    pub async fn in_memory(query_timeout: Duration) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .foreign_keys(true);

        // In-memory needs a single connection that is never recycled
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let database = Self::from_pool(pool, query_timeout);
        database.run_migrations().await?;

        Ok(database)
    }

    pub fn from_pool(pool: SqlitePool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: format!("Migration failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    /// Round-trip a trivial statement under the query deadline.
    pub async fn ping(&self) -> Result<()> {
        bounded(self.query_timeout, async {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        })
        .await
    }

    pub async fn begin(&self) -> Result<DbTransaction> {
        bounded(self.query_timeout, async { Ok(self.pool.begin().await?) }).await
    }

    pub async fn commit(&self, tx: DbTransaction) -> Result<()> {
        bounded(self.query_timeout, async {
            tx.commit().await?;
            Ok(())
        })
        .await
    }

    /// Close every pooled connection. Called once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
        log::info!("Database connections closed");
    }
}

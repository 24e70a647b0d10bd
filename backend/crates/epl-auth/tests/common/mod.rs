#![allow(dead_code)]

use epl_auth::{AuthService, AuthSettings, RateLimitConfig};
use epl_db::Database;

use std::time::Duration;

/// Creates an in-memory database with migrations run
pub async fn create_test_db() -> Database {
    Database::in_memory(Duration::from_secs(3))
        .await
        .expect("Failed to create test database")
}

/// Settings with the cheapest bcrypt cost and no login throttling
pub fn test_settings() -> AuthSettings {
    AuthSettings {
        bcrypt_cost: epl_auth::MIN_BCRYPT_COST,
        rate_limit: None,
        ..AuthSettings::default()
    }
}

pub async fn create_test_service() -> (Database, AuthService) {
    let db = create_test_db().await;
    let service = AuthService::new(db.clone(), test_settings());
    (db, service)
}

pub async fn create_service_with(settings: AuthSettings) -> (Database, AuthService) {
    let db = create_test_db().await;
    let service = AuthService::new(db.clone(), settings);
    (db, service)
}

/// Rename `table` out of the way so the next statement touching it fails.
pub async fn park_table(db: &Database, table: &str) {
    sqlx::query(&format!("ALTER TABLE {table} RENAME TO {table}_parked"))
        .execute(db.pool())
        .await
        .expect("Failed to park table");
}

pub async fn restore_table(db: &Database, table: &str) {
    sqlx::query(&format!("ALTER TABLE {table}_parked RENAME TO {table}"))
        .execute(db.pool())
        .await
        .expect("Failed to restore table");
}

/// Make every `DELETE` on `table` abort while reads and inserts keep working.
pub async fn block_deletes(db: &Database, table: &str) {
    sqlx::query(&format!(
        "CREATE TRIGGER block_{table}_delete BEFORE DELETE ON {table} \
         BEGIN SELECT RAISE(ABORT, 'deletes blocked'); END"
    ))
    .execute(db.pool())
    .await
    .expect("Failed to create trigger");
}

pub async fn unblock_deletes(db: &Database, table: &str) {
    sqlx::query(&format!("DROP TRIGGER block_{table}_delete"))
        .execute(db.pool())
        .await
        .expect("Failed to drop trigger");
}

pub fn throttled_settings(max_attempts: u32) -> AuthSettings {
    AuthSettings {
        rate_limit: Some(RateLimitConfig {
            max_attempts,
            window_secs: 60,
        }),
        ..test_settings()
    }
}

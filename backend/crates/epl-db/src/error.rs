use epl_core::ErrorLocation;

use std::panic::Location;
use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Duplicate email {location}")]
    DuplicateEmail { location: ErrorLocation },

    #[error("Record not found {location}")]
    NotFound { location: ErrorLocation },

    #[error("Edit conflict: record was modified by another writer {location}")]
    EditConflict { location: ErrorLocation },

    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Store call exceeded {}ms {location}", .timeout.as_millis())]
    Timeout {
        timeout: Duration,
        location: ErrorLocation,
    },

    #[error("Corrupt row in {table}: {message} {location}")]
    CorruptRow {
        table: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    /// Translate a write error, turning a unique-constraint violation into `DuplicateEmail`.
    #[track_caller]
    pub(crate) fn from_write(source: sqlx::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match &source {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::DuplicateEmail { location }
            }
            _ => Self::Sqlx { source, location },
        }
    }

    #[track_caller]
    pub(crate) fn corrupt(table: &'static str, message: impl Into<String>) -> Self {
        Self::CorruptRow {
            table,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;

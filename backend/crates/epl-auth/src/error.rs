use epl_core::CoreError;
use epl_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid authentication credentials {location}")]
    Unauthorized { location: ErrorLocation },

    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    #[error("A user with this email address already exists {location}")]
    DuplicateEmail { location: ErrorLocation },

    #[error("Record not found {location}")]
    NotFound { location: ErrorLocation },

    #[error("Edit conflict: the record changed, re-read and retry {location}")]
    EditConflict { location: ErrorLocation },

    #[error("Invalid '{field}': {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    Hashing {
        message: String,
        location: ErrorLocation,
    },

    #[error("Storage failure {location}")]
    StorageFailure {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Storage timeout {location}")]
    StorageTimeout { location: ErrorLocation },

    #[error("Rate limit exceeded: {limit} attempts per {window_secs}s {location}")]
    RateLimitExceeded {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },

    #[error("Invalid authorization scheme: expected 'Bearer' {location}")]
    InvalidScheme { location: ErrorLocation },
}

impl AuthError {
    #[track_caller]
    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        Self::Forbidden {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn hashing<S: Into<String>>(message: S) -> Self {
        Self::Hashing {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Lookup misses at the authentication boundary are reported as a
    /// generic credential failure.
    #[track_caller]
    pub(crate) fn not_found_as_unauthorized(self) -> Self {
        match self {
            Self::NotFound { .. } => Self::unauthorized(),
            other => other,
        }
    }
}

impl From<DbError> for AuthError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match source {
            DbError::DuplicateEmail { .. } => Self::DuplicateEmail { location },
            DbError::NotFound { .. } => Self::NotFound { location },
            DbError::EditConflict { .. } => Self::EditConflict { location },
            DbError::Timeout { .. } => Self::StorageTimeout { location },
            other => {
                log::error!("Store failure: {}", other);
                Self::StorageFailure {
                    source: other,
                    location,
                }
            }
        }
    }
}

impl From<CoreError> for AuthError {
    #[track_caller]
    fn from(error: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            CoreError::Validation { field, message, .. } => Self::Validation {
                field,
                message,
                location,
            },
            CoreError::InvalidTokenScope { value, .. } => Self::Validation {
                field: "scope",
                message: format!("unknown scope '{}'", value),
                location,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

//! REST API error types
//!
//! Every failure leaves the server as `{"error": {"code", "message", "field"}}`
//! with a status derived from the credential error taxonomy. Store and hashing
//! details stay in the log.

use epl_auth::AuthError;

use std::panic::Location;

use axum::{
    Json,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use http::header::WWW_AUTHENTICATE;
use serde::Serialize;
use thiserror::Error;

const INTERNAL_MESSAGE: &str = "the server encountered a problem and could not process your request";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "UNAUTHORIZED", "VALIDATION_ERROR")
    pub code: String,
    pub message: String,
    /// Offending input field, for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// 401, carries `WWW-Authenticate: Bearer`
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// 403
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// 404
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// 400
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// 422
    #[error("Duplicate email {location}")]
    DuplicateEmail { location: ErrorLocation },

    /// 409, the client must re-read before retrying
    #[error("Edit conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// 429
    #[error("Rate limited: {message} {location}")]
    RateLimited {
        message: String,
        location: ErrorLocation,
    },

    /// 503
    #[error("Service unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// 500
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },

    /// 400
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } | Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::DuplicateEmail { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("{}", self);
        }

        let (code, message, field) = match self {
            ApiError::Unauthorized { message, .. } => ("UNAUTHORIZED", message, None),
            ApiError::Forbidden { message, .. } => ("FORBIDDEN", message, None),
            ApiError::NotFound { message, .. } => ("NOT_FOUND", message, None),
            ApiError::Validation { message, field, .. } => ("VALIDATION_ERROR", message, field),
            ApiError::DuplicateEmail { .. } => (
                "DUPLICATE_EMAIL",
                "a user with this email address already exists".to_string(),
                Some("email".to_string()),
            ),
            ApiError::Conflict { message, .. } => ("EDIT_CONFLICT", message, None),
            ApiError::RateLimited { message, .. } => ("RATE_LIMIT_EXCEEDED", message, None),
            ApiError::Unavailable { message, .. } => ("SERVICE_UNAVAILABLE", message, None),
            ApiError::Internal { message, .. } => ("INTERNAL_ERROR", message, None),
            ApiError::BadRequest { message, .. } => ("BAD_REQUEST", message, None),
        };

        let body = ApiErrorResponse {
            error: ApiErrorBody {
                code: code.to_string(),
                message,
                field,
            },
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            AuthError::Unauthorized { .. } => ApiError::Unauthorized {
                message: "invalid authentication credentials".to_string(),
                location,
            },
            AuthError::InvalidScheme { .. } => ApiError::Unauthorized {
                message: "invalid or missing authentication token".to_string(),
                location,
            },
            AuthError::Forbidden { message, .. } => ApiError::Forbidden { message, location },
            AuthError::DuplicateEmail { .. } => ApiError::DuplicateEmail { location },
            AuthError::NotFound { .. } => ApiError::NotFound {
                message: "the requested resource could not be found".to_string(),
                location,
            },
            AuthError::EditConflict { .. } => ApiError::Conflict {
                message: "unable to update the record due to an edit conflict, please re-read and try again"
                    .to_string(),
                location,
            },
            AuthError::Validation { field, message, .. } => ApiError::Validation {
                message,
                field: Some(field.to_string()),
                location,
            },
            AuthError::RateLimitExceeded { window_secs, .. } => ApiError::RateLimited {
                message: format!("too many login attempts, retry within {}s", window_secs),
                location,
            },
            AuthError::StorageTimeout { .. } => ApiError::Unavailable {
                message: "the server is temporarily unable to complete the request".to_string(),
                location,
            },
            AuthError::Hashing { .. } | AuthError::StorageFailure { .. } => {
                log::error!("Request failed: {}", e);
                ApiError::Internal {
                    message: INTERNAL_MESSAGE.to_string(),
                    location,
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

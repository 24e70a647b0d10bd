use crate::ApiError;

use epl_auth::AuthError;
use epl_core::ErrorLocation;
use epl_db::DbError;

use std::panic::Location;
use std::time::Duration;

use axum::response::IntoResponse;
use http::StatusCode;
use http::header::WWW_AUTHENTICATE;
use http_body_util::BodyExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_unauthorized_returns_401_with_challenge_header() {
    let error: ApiError = AuthError::unauthorized().into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers().get(WWW_AUTHENTICATE).unwrap(), "Bearer");

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    assert_eq!(json["error"]["message"], "invalid authentication credentials");
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error: ApiError = AuthError::Validation {
        field: "password",
        message: "must be at least 8 bytes long".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "password");
}

#[tokio::test]
async fn test_duplicate_email_returns_422_naming_email() {
    let error: ApiError = AuthError::DuplicateEmail {
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "DUPLICATE_EMAIL");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn test_edit_conflict_returns_409() {
    let error: ApiError = AuthError::EditConflict {
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"]["code"], "EDIT_CONFLICT");
}

#[tokio::test]
async fn test_storage_failure_returns_500_without_driver_text() {
    let db_error = DbError::Initialization {
        message: "disk I/O error at /var/lib/epl.db".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let error: ApiError = AuthError::from(db_error).into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("disk I/O"));
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_storage_timeout_returns_503() {
    let db_error = DbError::Timeout {
        timeout: Duration::from_secs(3),
        location: ErrorLocation::from(Location::caller()),
    };
    let error: ApiError = AuthError::from(db_error).into();

    assert_eq!(error.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_rate_limit_returns_429() {
    let error: ApiError = AuthError::RateLimitExceeded {
        limit: 10,
        window_secs: 60,
        location: ErrorLocation::from(Location::caller()),
    }
    .into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body_json(response).await["error"]["code"], "RATE_LIMIT_EXCEEDED");
}

#[tokio::test]
async fn test_forbidden_keeps_policy_message() {
    let error: ApiError = AuthError::forbidden("account must be activated").into();
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(response.headers().get(WWW_AUTHENTICATE).is_none());
    assert_eq!(
        body_json(response).await["error"]["message"],
        "account must be activated"
    );
}

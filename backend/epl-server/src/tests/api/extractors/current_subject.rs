use crate::{AppState, CurrentSubject};

use epl_auth::AuthSettings;
use epl_db::{DEFAULT_QUERY_TIMEOUT, Database};

use axum::{body::Body, extract::FromRequestParts, http::Request};
use http::StatusCode;
use http::header::AUTHORIZATION;

async fn create_test_state() -> AppState {
    let db = Database::in_memory(DEFAULT_QUERY_TIMEOUT)
        .await
        .expect("Failed to create test database");

    AppState::new(
        db,
        AuthSettings {
            bcrypt_cost: epl_auth::MIN_BCRYPT_COST,
            rate_limit: None,
            ..AuthSettings::default()
        },
    )
}

async fn extract(state: &AppState, request: Request<Body>) -> Result<CurrentSubject, crate::ApiError> {
    let (mut parts, _body) = request.into_parts();
    CurrentSubject::from_request_parts(&mut parts, state).await
}

#[tokio::test]
async fn test_extractor_without_header_yields_anonymous() {
    let state = create_test_state().await;
    let request = Request::builder().body(Body::empty()).unwrap();

    let CurrentSubject(subject) = extract(&state, request).await.unwrap();

    assert!(subject.is_anonymous());
}

#[tokio::test]
async fn test_extractor_with_valid_token_yields_identity() {
    let state = create_test_state().await;
    let alice = state
        .auth
        .register("Alice", "alice@x.com", "password123")
        .await
        .unwrap();
    let token = state.auth.login("alice@x.com", "password123").await.unwrap();
    let request = Request::builder()
        .header(AUTHORIZATION, format!("Bearer {}", token.plaintext))
        .body(Body::empty())
        .unwrap();

    let CurrentSubject(subject) = extract(&state, request).await.unwrap();

    assert_eq!(subject.identity().map(|i| i.id), Some(alice.id));
}

#[tokio::test]
async fn test_extractor_with_wrong_scheme_rejects_with_401() {
    let state = create_test_state().await;
    let request = Request::builder()
        .header(AUTHORIZATION, "Basic YWxpY2U6c2VjcmV0")
        .body(Body::empty())
        .unwrap();

    let rejection = extract(&state, request).await.err().unwrap();

    assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extractor_with_unknown_token_rejects_with_401() {
    let state = create_test_state().await;
    let request = Request::builder()
        .header(AUTHORIZATION, format!("Bearer {}", "Z".repeat(26)))
        .body(Body::empty())
        .unwrap();

    let rejection = extract(&state, request).await.err().unwrap();

    assert_eq!(rejection.status(), StatusCode::UNAUTHORIZED);
}

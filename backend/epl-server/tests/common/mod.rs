#![allow(dead_code)]

//! Test infrastructure for epl-server API tests

use epl_auth::AuthSettings;
use epl_db::{DEFAULT_QUERY_TIMEOUT, Database};
use epl_server::{AppState, build_router};

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const ALICE_EMAIL: &str = "alice@x.com";
pub const ALICE_PASSWORD: &str = "password123";

pub fn test_settings() -> AuthSettings {
    AuthSettings {
        bcrypt_cost: epl_auth::MIN_BCRYPT_COST,
        rate_limit: None,
        ..AuthSettings::default()
    }
}

pub async fn create_test_app_state() -> AppState {
    create_app_state_with(test_settings()).await
}

pub async fn create_app_state_with(settings: AuthSettings) -> AppState {
    let db = Database::in_memory(DEFAULT_QUERY_TIMEOUT)
        .await
        .expect("Failed to create test database");
    AppState::new(db, settings)
}

/// Sends one request through a fresh router built over `state`
pub async fn send(state: &AppState, request: Request<Body>) -> Response<Body> {
    let app: Router = build_router(state.clone());
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Registers Alice through the library and returns her id with a fresh login token
pub async fn create_logged_in_alice(state: &AppState) -> (i64, String) {
    let alice = state
        .auth
        .register("Alice", ALICE_EMAIL, ALICE_PASSWORD)
        .await
        .expect("Failed to register Alice");
    let token = state
        .auth
        .login(ALICE_EMAIL, ALICE_PASSWORD)
        .await
        .expect("Failed to log Alice in");
    (alice.id, token.plaintext)
}

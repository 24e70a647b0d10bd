//! Authentication token REST API handlers

use crate::{ApiResult, AppState, CurrentSubject, LoginRequest, LogoutResponse, TokenResponse};

use axum::{Json, extract::State, http::StatusCode};

/// POST /v1/tokens/authentication
pub async fn create_authentication_token(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let token = state.auth.login(&req.email, &req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            authentication_token: token.into(),
        }),
    ))
}

/// DELETE /v1/tokens/authentication
///
/// Signs the caller out of every session, not just the one presenting the token.
pub async fn delete_authentication_tokens(
    State(state): State<AppState>,
    subject: CurrentSubject,
) -> ApiResult<Json<LogoutResponse>> {
    let identity = subject.require_activated(&state)?;
    let revoked = state.auth.logout(&identity).await?;

    Ok(Json(LogoutResponse { revoked }))
}

//! User REST API handlers

use crate::{
    ActivateRequest, ApiError, ApiResult, AppState, CurrentSubject, RegisterRequest,
    UpdateProfileRequest, UserResponse,
};

use std::panic::Location;

use axum::{Json, extract::State, http::StatusCode};
use error_location::ErrorLocation;

/// POST /v1/users
pub async fn register_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let identity = state
        .auth
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            user: identity.into(),
        }),
    ))
}

/// PUT /v1/users/activated
pub async fn activate_user(
    State(state): State<AppState>,
    Json(req): Json<ActivateRequest>,
) -> ApiResult<Json<UserResponse>> {
    let identity = state.auth.activate(&req.token).await?;

    Ok(Json(UserResponse {
        user: identity.into(),
    }))
}

/// GET /v1/users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    subject: CurrentSubject,
) -> ApiResult<Json<UserResponse>> {
    let identity = subject.require_activated(&state)?;

    Ok(Json(UserResponse {
        user: identity.into(),
    }))
}

/// PATCH /v1/users/me
pub async fn update_current_user(
    State(state): State<AppState>,
    subject: CurrentSubject,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let identity = subject.require_activated(&state)?;
    let (version, update) = req.into_parts();

    if update.is_empty() {
        return Err(ApiError::bad_request("at least one of name, email or password is required"));
    }

    // The client's copy is stale even if this request's read is not.
    if version != identity.version {
        return Err(ApiError::Conflict {
            message: format!(
                "record is at version {}, request was based on version {}",
                identity.version, version
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let updated = state.auth.update_profile(identity, update).await?;
    log::info!("User {} updated profile (version {})", updated.id, updated.version);

    Ok(Json(UserResponse {
        user: updated.into(),
    }))
}

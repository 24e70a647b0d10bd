//! Permission grant REST API handlers

use crate::{ApiResult, AppState, CurrentSubject, GrantPermissionsRequest, PermissionListResponse};

use axum::{
    Json,
    extract::{Path, State},
};

/// Code required to grant permissions or read another user's grants.
pub const PERMISSIONS_ADMIN_CODE: &str = "permissions:write";

/// GET /v1/users/{id}/permissions
pub async fn list_permissions(
    State(state): State<AppState>,
    subject: CurrentSubject,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<PermissionListResponse>> {
    let caller = subject.require_activated(&state)?;
    if caller.id != user_id {
        state
            .auth
            .require_permission(&subject.0, PERMISSIONS_ADMIN_CODE)
            .await?;
    }

    let target = state.auth.find_identity(user_id).await?;
    let permissions = state.auth.list_permissions(target.id).await?;

    Ok(Json(PermissionListResponse::new(target.id, permissions)))
}

/// POST /v1/users/{id}/permissions
pub async fn grant_permissions(
    State(state): State<AppState>,
    subject: CurrentSubject,
    Path(user_id): Path<i64>,
    Json(req): Json<GrantPermissionsRequest>,
) -> ApiResult<Json<PermissionListResponse>> {
    let caller = state
        .auth
        .require_permission(&subject.0, PERMISSIONS_ADMIN_CODE)
        .await?;

    let target = state.auth.find_identity(user_id).await?;
    let added = state.auth.grant_permissions(target.id, &req.codes).await?;
    log::info!(
        "User {} granted {} permission(s) to user {}",
        caller.id,
        added,
        target.id
    );

    let permissions = state.auth.list_permissions(target.id).await?;
    Ok(Json(PermissionListResponse::new(target.id, permissions)))
}

use crate::{
    AppState, activate_user, create_authentication_token, delete_authentication_tokens,
    get_current_user, grant_permissions, health, list_permissions, register_user,
    update_current_user,
};

use axum::{
    Router,
    routing::{get, post, put},
};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Users
        .route("/v1/users", post(register_user))
        .route("/v1/users/activated", put(activate_user))
        .route(
            "/v1/users/me",
            get(get_current_user).patch(update_current_user),
        )
        .route(
            "/v1/users/{id}/permissions",
            get(list_permissions).post(grant_permissions),
        )
        // Tokens
        .route(
            "/v1/tokens/authentication",
            post(create_authentication_token).delete(delete_authentication_tokens),
        )
        .with_state(state)
}

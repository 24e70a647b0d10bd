pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod reaper;
pub mod routes;
pub mod settings;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::current_subject::CurrentSubject,
    permissions::{
        grant_permissions_request::GrantPermissionsRequest,
        permission_list_response::PermissionListResponse,
        permissions::{grant_permissions, list_permissions},
    },
    tokens::{
        login_request::LoginRequest,
        logout_response::LogoutResponse,
        token_dto::TokenDto,
        token_response::TokenResponse,
        tokens::{create_authentication_token, delete_authentication_tokens},
    },
    users::{
        activate_request::ActivateRequest,
        register_request::RegisterRequest,
        update_profile_request::UpdateProfileRequest,
        user_dto::UserDto,
        user_response::UserResponse,
        users::{activate_user, get_current_user, register_user, update_current_user},
    },
};
pub use app_state::AppState;

pub use crate::routes::build_router;

pub mod activate_request;
pub mod register_request;
pub mod update_profile_request;
pub mod user_dto;
pub mod user_response;
#[allow(clippy::module_inception)]
pub mod users;

pub mod login_request;
pub mod logout_response;
pub mod token_dto;
pub mod token_response;
#[allow(clippy::module_inception)]
pub mod tokens;

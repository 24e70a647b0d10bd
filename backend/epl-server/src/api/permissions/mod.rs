pub mod grant_permissions_request;
pub mod permission_list_response;
#[allow(clippy::module_inception)]
pub mod permissions;

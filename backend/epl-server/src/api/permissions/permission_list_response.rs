use epl_core::Permissions;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PermissionListResponse {
    pub user_id: i64,
    pub permissions: Vec<String>,
}

impl PermissionListResponse {
    pub fn new(user_id: i64, permissions: Permissions) -> Self {
        Self {
            user_id,
            permissions: permissions.into_iter().collect(),
        }
    }
}

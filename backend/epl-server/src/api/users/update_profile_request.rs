use epl_auth::ProfileUpdate;

use serde::Deserialize;

/// Partial update of the caller's own record. `version` is the one the
/// client last read.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub version: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_parts(self) -> (i32, ProfileUpdate) {
        (
            self.version,
            ProfileUpdate {
                name: self.name,
                email: self.email,
                password: self.password,
            },
        )
    }
}

use epl_core::Identity;

use serde::Serialize;

/// Public view of an identity. The password hash never leaves the server.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i64,
    pub created_at: String,
    pub name: String,
    pub email: String,
    pub activated: bool,
    pub version: i32,
}

impl From<Identity> for UserDto {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            created_at: identity.created_at.to_rfc3339(),
            name: identity.name,
            email: identity.email,
            activated: identity.activated,
            version: identity.version,
        }
    }
}

use crate::PasswordHash;

/// An identity that is ready to persist.
///
/// There is no way to build one without a [`PasswordHash`].
#[derive(Debug, Clone)]
pub struct NewIdentity {
    pub name: String,
    pub email: String,
    pub password_hash: PasswordHash,
    pub activated: bool,
}

impl NewIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password_hash: PasswordHash) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password_hash,
            activated: false,
        }
    }
}

use crate::Identity;

/// Who is making a request: nobody, or a resolved identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthSubject {
    Anonymous,
    Authenticated(Identity),
}

impl AuthSubject {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }

    pub fn into_identity(self) -> Option<Identity> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(identity) => Some(identity),
        }
    }
}

impl From<Identity> for AuthSubject {
    fn from(identity: Identity) -> Self {
        Self::Authenticated(identity)
    }
}

use crate::Result as AuthErrorResult;

use epl_core::validation::{validate_email, validate_name, validate_password_plaintext};

/// Fields a user may change on their own record. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> AuthErrorResult<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_password_plaintext(password)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.password.is_none()
    }
}

//! Field rules applied before an identity reaches the store.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::sync::LazyLock;

use error_location::ErrorLocation;
use regex::Regex;

pub const MAX_NAME_BYTES: usize = 500;
pub const MIN_PASSWORD_BYTES: usize = 8;
/// bcrypt ignores everything past 72 bytes.
pub const MAX_PASSWORD_BYTES: usize = 72;

static EMAIL_RX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"#,
    )
    .expect("email pattern is a valid regex")
});

#[track_caller]
fn invalid(field: &'static str, message: impl Into<String>) -> CoreError {
    CoreError::Validation {
        field,
        message: message.into(),
        location: ErrorLocation::from(Location::caller()),
    }
}

#[track_caller]
pub fn validate_email(email: &str) -> CoreErrorResult<()> {
    if email.is_empty() {
        return Err(invalid("email", "must be provided"));
    }
    if !EMAIL_RX.is_match(email) {
        return Err(invalid("email", "must be a valid email address"));
    }
    Ok(())
}

#[track_caller]
pub fn validate_password_plaintext(password: &str) -> CoreErrorResult<()> {
    if password.is_empty() {
        return Err(invalid("password", "must be provided"));
    }
    if password.len() < MIN_PASSWORD_BYTES {
        return Err(invalid(
            "password",
            format!("must be at least {MIN_PASSWORD_BYTES} bytes long"),
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(invalid(
            "password",
            format!("must not be more than {MAX_PASSWORD_BYTES} bytes long"),
        ));
    }
    Ok(())
}

#[track_caller]
pub fn validate_name(name: &str) -> CoreErrorResult<()> {
    if name.is_empty() {
        return Err(invalid("name", "must be provided"));
    }
    if name.len() > MAX_NAME_BYTES {
        return Err(invalid(
            "name",
            format!("must not be more than {MAX_NAME_BYTES} bytes long"),
        ));
    }
    Ok(())
}

/// Checks every field of a registration request, reporting the first failure.
#[track_caller]
pub fn validate_registration(name: &str, email: &str, password: &str) -> CoreErrorResult<()> {
    validate_name(name)?;
    validate_email(email)?;
    validate_password_plaintext(password)
}

use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

/// Extract the credential from an `Authorization: Bearer <token>` header value.
#[track_caller]
pub fn parse_bearer(header: &str) -> AuthErrorResult<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::InvalidScheme {
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

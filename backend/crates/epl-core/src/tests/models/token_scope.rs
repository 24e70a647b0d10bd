use crate::TokenScope;

use std::str::FromStr;

#[test]
fn test_token_scope_as_str() {
    assert_eq!(TokenScope::Authentication.as_str(), "authentication");
    assert_eq!(TokenScope::Activation.as_str(), "activation");
    assert_eq!(TokenScope::PasswordReset.as_str(), "password-reset");
}

#[test]
fn test_token_scope_from_str() {
    assert_eq!(
        TokenScope::from_str("authentication").unwrap(),
        TokenScope::Authentication
    );
    assert_eq!(
        TokenScope::from_str("password-reset").unwrap(),
        TokenScope::PasswordReset
    );
    assert!(TokenScope::from_str("Authentication").is_err());
    assert!(TokenScope::from_str("").is_err());
}

#[test]
fn test_token_scope_display_matches_storage_form() {
    assert_eq!(TokenScope::Activation.to_string(), "activation");
}

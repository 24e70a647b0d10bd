use crate::{AuthSubject, Identity, PasswordHash};

use chrono::Utc;

fn alice() -> Identity {
    Identity {
        id: 7,
        created_at: Utc::now(),
        name: "Alice".to_string(),
        email: "alice@x.com".to_string(),
        password_hash: PasswordHash::from_bytes(b"$2b$04$stub".to_vec()),
        activated: false,
        version: 1,
    }
}

#[test]
fn test_anonymous_has_no_identity() {
    let subject = AuthSubject::Anonymous;

    assert!(subject.is_anonymous());
    assert!(subject.identity().is_none());
}

#[test]
fn test_authenticated_exposes_identity() {
    let subject = AuthSubject::from(alice());

    assert!(!subject.is_anonymous());
    assert_eq!(subject.identity().map(|i| i.id), Some(7));
    assert_eq!(subject.into_identity().map(|i| i.email), Some("alice@x.com".to_string()));
}

#[test]
fn test_password_hash_debug_is_redacted() {
    let identity = alice();

    let debug = format!("{:?}", identity);
    assert!(!debug.contains("stub"));
    assert!(debug.contains("<redacted>"));
}

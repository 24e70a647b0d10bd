use crate::Permissions;

use googletest::prelude::*;

#[test]
fn given_codes_when_collected_then_duplicates_collapse() {
    let permissions: Permissions = ["teams:write", "teams:read", "teams:write"]
        .into_iter()
        .collect();

    assert_that!(permissions.len(), eq(2));
    assert!(permissions.includes("teams:write"));
    assert!(!permissions.includes("comments:write"));
}

#[test]
fn given_empty_set_when_checked_then_includes_nothing() {
    let permissions = Permissions::new();

    assert!(permissions.is_empty());
    assert!(!permissions.includes("teams:read"));
}

#[test]
fn given_codes_when_iterated_then_sorted() {
    let permissions: Permissions = ["teams:write", "comments:read"].into_iter().collect();

    let codes: Vec<&str> = permissions.iter().collect();
    assert_eq!(codes, vec!["comments:read", "teams:write"]);
}

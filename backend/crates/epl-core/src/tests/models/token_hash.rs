use crate::TokenHash;

use googletest::prelude::*;

#[test]
fn given_same_plaintext_when_hashed_twice_then_digests_match() {
    let first = TokenHash::of("Y3QMGX3PJ3WLRL2YRTQGQ6KRHU");
    let second = TokenHash::of("Y3QMGX3PJ3WLRL2YRTQGQ6KRHU");

    assert_that!(first, eq(second));
}

#[test]
fn given_different_plaintexts_when_hashed_then_digests_differ() {
    let first = TokenHash::of("Y3QMGX3PJ3WLRL2YRTQGQ6KRHU");
    let second = TokenHash::of("Y3QMGX3PJ3WLRL2YRTQGQ6KRHV");

    assert_that!(first, not(eq(second)));
}

#[test]
fn given_known_input_when_hashed_then_matches_sha256() {
    // sha256("abc")
    let hash = TokenHash::of("abc");

    assert_eq!(hash.as_bytes()[..4], [0xba, 0x78, 0x16, 0xbf]);
}

#[test]
fn given_wrong_length_slice_when_rebuilding_then_none() {
    assert_that!(TokenHash::from_slice(&[0u8; 31]), none());
    assert_that!(TokenHash::from_slice(&[0u8; 32]), some(anything()));
}

#[test]
fn given_hash_when_debug_formatted_then_full_digest_not_printed() {
    let hash = TokenHash::of("abc");

    assert_that!(format!("{:?}", hash), eq("TokenHash(ba78..)"));
}

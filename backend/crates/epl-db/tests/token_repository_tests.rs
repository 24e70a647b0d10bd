mod common;

use common::{create_test_db, create_test_token, create_test_user};

use epl_core::TokenScope;
use epl_db::{DbError, TokenRepository, UserRepository};

use chrono::{TimeDelta, Utc};
use googletest::prelude::*;

#[tokio::test]
async fn given_inserted_token_when_inspecting_row_then_only_digest_is_stored() {
    // Given: A stored token
    let db = create_test_db().await;
    let alice = create_test_user(&db, "alice@x.com").await;
    let token = create_test_token(
        "PLAINTEXTPLAINTEXTPLAINTEX",
        alice.id,
        TokenScope::Authentication,
        TimeDelta::hours(1),
    );
    TokenRepository::new(db.clone()).insert(&token).await.unwrap();

    // When: Reading the raw row
    let (hash, scope): (Vec<u8>, String) =
        sqlx::query_as("SELECT hash, scope FROM tokens WHERE user_id = ?")
            .bind(alice.id)
            .fetch_one(db.pool())
            .await
            .unwrap();

    // Then: The row holds the 32-byte digest, never the plaintext
    assert_that!(hash.len(), eq(32));
    assert_that!(hash.as_slice(), eq(token.hash.as_bytes().as_slice()));
    assert!(!hash.windows(token.plaintext.len()).any(|w| w == token.plaintext.as_bytes()));
    assert_that!(scope, eq("authentication"));
}

#[tokio::test]
async fn given_tokens_in_two_scopes_when_revoking_one_scope_then_other_survives() {
    // Given: Alice holds two authentication tokens and one activation token
    let db = create_test_db().await;
    let users = UserRepository::new(db.clone());
    let tokens = TokenRepository::new(db.clone());
    let alice = create_test_user(&db, "alice@x.com").await;
    let session_a = create_test_token("A1A1A1A1A1A1A1A1A1A1A1A1A1", alice.id, TokenScope::Authentication, TimeDelta::hours(1));
    let session_b = create_test_token("B2B2B2B2B2B2B2B2B2B2B2B2B2", alice.id, TokenScope::Authentication, TimeDelta::hours(1));
    let activation = create_test_token("C3C3C3C3C3C3C3C3C3C3C3C3C3", alice.id, TokenScope::Activation, TimeDelta::hours(1));
    for token in [&session_a, &session_b, &activation] {
        tokens.insert(token).await.unwrap();
    }

    // When: Revoking all authentication tokens
    let removed = tokens
        .delete_all_for_user(TokenScope::Authentication, alice.id)
        .await
        .unwrap();

    // Then: Both sessions are gone, activation still resolves
    assert_that!(removed, eq(2));
    let gone = users
        .get_for_token(TokenScope::Authentication, &session_a.plaintext)
        .await;
    assert!(matches!(gone, Err(DbError::NotFound { .. })));
    let kept = users
        .get_for_token(TokenScope::Activation, &activation.plaintext)
        .await;
    assert_that!(kept.map(|i| i.id).ok(), some(eq(alice.id)));
}

#[tokio::test]
async fn given_other_users_tokens_when_revoking_then_they_are_untouched() {
    let db = create_test_db().await;
    let users = UserRepository::new(db.clone());
    let tokens = TokenRepository::new(db.clone());
    let alice = create_test_user(&db, "alice@x.com").await;
    let bob = create_test_user(&db, "bob@x.com").await;
    let bobs = create_test_token("BOBBOBBOBBOBBOBBOBBOBBOBBO", bob.id, TokenScope::Authentication, TimeDelta::hours(1));
    tokens.insert(&bobs).await.unwrap();

    let removed = tokens
        .delete_all_for_user(TokenScope::Authentication, alice.id)
        .await
        .unwrap();

    assert_that!(removed, eq(0));
    let owner = users
        .get_for_token(TokenScope::Authentication, &bobs.plaintext)
        .await
        .unwrap();
    assert_that!(owner.id, eq(bob.id));
}

#[tokio::test]
async fn given_expired_and_live_tokens_when_reaping_then_only_expired_rows_removed() {
    let db = create_test_db().await;
    let tokens = TokenRepository::new(db.clone());
    let alice = create_test_user(&db, "alice@x.com").await;
    let live = create_test_token("LIVELIVELIVELIVELIVELIVELI", alice.id, TokenScope::Authentication, TimeDelta::hours(1));
    let dead = create_test_token("DEADDEADDEADDEADDEADDEADDE", alice.id, TokenScope::Authentication, TimeDelta::hours(-1));
    tokens.insert(&live).await.unwrap();
    tokens.insert(&dead).await.unwrap();

    let reaped = tokens.delete_expired(Utc::now()).await.unwrap();

    assert_that!(reaped, eq(1));
    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tokens")
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_that!(remaining, eq(1));
}

#[tokio::test]
async fn given_unknown_user_when_inserting_token_then_storage_failure() {
    let db = create_test_db().await;
    let tokens = TokenRepository::new(db);
    let orphan = create_test_token("ORPHANORPHANORPHANORPHANOR", 999, TokenScope::Authentication, TimeDelta::hours(1));

    let result = tokens.insert(&orphan).await;

    assert!(matches!(result, Err(DbError::Sqlx { .. })));
}

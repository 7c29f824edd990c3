//! Integration tests for Users domain
//!
//! These use real PostgreSQL via testcontainers to check that:
//! - The UNIQUE constraint on `users.email` surfaces as `DuplicateEmail`
//! - Avatar filenames persist
//! - Reset tokens are stored and found by their token value
//! - Deleting a user cascades to their reset tokens
//!
//! Run with `cargo test -- --ignored` on a machine with Docker.

use domain_users::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};
use uuid::Uuid;

fn user(builder: &TestDataBuilder, local: &str) -> User {
    User::new(
        builder.name("user", local),
        builder.email(local),
        "$argon2id$placeholder".to_string(),
    )
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_and_find_user_by_email() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("find_by_email");

    let created = repo.create(user(&builder, "ana")).await.unwrap();

    let by_email = assert_some(
        repo.get_by_email(&created.email).await.unwrap(),
        "user should be found by email",
    );
    assert_uuid_eq(by_email.id, created.id, "user id");
    assert_eq!(by_email.password_hash, created.password_hash);
    assert_eq!(by_email.avatar, None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_unique_email_constraint_maps_to_duplicate() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("unique_email");

    repo.create(user(&builder, "ana")).await.unwrap();
    let result = repo.create(user(&builder, "ana")).await;

    assert!(matches!(result, Err(UserError::DuplicateEmail(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_persists_avatar() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("avatar");

    let mut created = repo.create(user(&builder, "ana")).await.unwrap();
    created.avatar = Some("0123456789abcdef0123-me.png".to_string());
    repo.update(created.clone()).await.unwrap();

    let fetched = assert_some(repo.get_by_id(created.id).await.unwrap(), "user");
    assert_eq!(fetched.avatar.as_deref(), Some("0123456789abcdef0123-me.png"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_missing_user_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgUserRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("update_missing");

    let result = repo.update(user(&builder, "ghost")).await;

    assert!(matches!(result, Err(UserError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_reset_token_round_trip_and_cascade() {
    let db = TestDatabase::new().await;
    let users = PgUserRepository::new(db.connection());
    let tokens = PgUserTokenRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("tokens");

    let ana = users.create(user(&builder, "ana")).await.unwrap();
    let issued = tokens.generate(ana.id).await.unwrap();

    let found = assert_some(
        tokens.find_by_token(issued.token).await.unwrap(),
        "token should be stored",
    );
    assert_uuid_eq(found.user_id, ana.id, "token owner");

    assert!(tokens.find_by_token(Uuid::new_v4()).await.unwrap().is_none());

    assert!(users.delete(ana.id).await.unwrap());
    assert!(tokens.find_by_token(issued.token).await.unwrap().is_none());
}

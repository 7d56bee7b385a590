//! Unit tests for mock user repository implementation

use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn user(email: &str) -> User {
    User::new(NewUser {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
    })
}

#[tokio::test]
async fn test_create_and_find_by_email() {
    let repo = MockUserRepository::new();
    let created = repo.create(user("Alice@Example.com")).await.unwrap();

    let found = repo.find_by_email("alice@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(created.id));
    assert!(repo.exists_by_email("alice@example.com").await.unwrap());
    assert!(!repo.exists_by_email("bob@example.com").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_normalized_email_rejected() {
    let repo = MockUserRepository::new();
    repo.create(user("alice@example.com")).await.unwrap();

    let result = repo.create(user("  ALICE@example.com")).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserAlreadyExists))
    ));
}

#[tokio::test]
async fn test_find_by_ids_skips_unknown() {
    let repo = MockUserRepository::new();
    let a = repo.create(user("a@example.com")).await.unwrap();
    let b = repo.create(user("b@example.com")).await.unwrap();

    let found = repo
        .find_by_ids(&[a.id, uuid::Uuid::new_v4(), b.id])
        .await
        .unwrap();
    assert_eq!(found.len(), 2);
}

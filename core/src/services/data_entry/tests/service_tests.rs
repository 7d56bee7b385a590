//! Unit tests for data entry service

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::data_entry::{DataEntryInput, UNKNOWN_OWNER};
use crate::domain::entities::user::{NewUser, User};
use crate::errors::{DomainError, ValidationError};
use crate::repositories::{MockDataEntryRepository, MockUserRepository, UserRepository};
use crate::services::data_entry::{
    max_entry_value, normalize_entry_value, validate_entry_input, DataEntryService,
};

type Service = DataEntryService<MockDataEntryRepository, MockUserRepository>;

async fn setup() -> (Service, User, User) {
    let users = Arc::new(MockUserRepository::new());
    let alice = users.create(user("alice@example.com", "Alice")).await.unwrap();
    let bob = users.create(user("bob@example.com", "Bob")).await.unwrap();
    let service = DataEntryService::new(Arc::new(MockDataEntryRepository::new()), users);
    (service, alice, bob)
}

fn user(email: &str, first: &str) -> User {
    User::new(NewUser {
        email: email.to_string(),
        password_hash: "hash".to_string(),
        first_name: first.to_string(),
        last_name: "Smith".to_string(),
    })
}

fn input(title: &str, value: i64) -> DataEntryInput {
    DataEntryInput {
        title: title.to_string(),
        description: "  some text ".to_string(),
        category: "General".to_string(),
        value: Decimal::new(value, 0),
    }
}

#[tokio::test]
async fn test_create_and_list_personal() {
    let (service, alice, bob) = setup().await;
    let created = service.create(alice.id, input("Alpha", 10)).await.unwrap();
    service.create(bob.id, input("Beta", 20)).await.unwrap();

    assert_eq!(created.created_by, "Alice Smith");
    assert_eq!(created.entry.description, "some text");

    let personal = service.list_personal(alice.id).await.unwrap();
    assert_eq!(personal.len(), 1);
    assert_eq!(personal[0].entry.title, "Alpha");
}

#[tokio::test]
async fn test_list_all_includes_every_owner() {
    let (service, alice, bob) = setup().await;
    service.create(alice.id, input("Alpha", 10)).await.unwrap();
    service.create(bob.id, input("Beta", 20)).await.unwrap();

    let all = service.list_all().await.unwrap();
    assert_eq!(all.len(), 2);
    let mut owners: Vec<&str> = all.iter().map(|v| v.created_by.as_str()).collect();
    owners.sort();
    assert_eq!(owners, vec!["Alice Smith", "Bob Smith"]);
}

#[tokio::test]
async fn test_unknown_owner_name() {
    let (service, _, _) = setup().await;
    service.create(Uuid::new_v4(), input("Orphan", 1)).await.unwrap();

    let all = service.list_all().await.unwrap();
    assert_eq!(all[0].created_by, UNKNOWN_OWNER);
}

#[tokio::test]
async fn test_foreign_entry_is_not_found() {
    let (service, alice, bob) = setup().await;
    let entry = service.create(alice.id, input("Alpha", 10)).await.unwrap().entry;

    assert!(matches!(
        service.get(bob.id, entry.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service.update(bob.id, entry.id, input("Stolen", 0)).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete(bob.id, entry.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        service.get(alice.id, Uuid::new_v4()).await,
        Err(DomainError::NotFound { .. })
    ));

    let still_there = service.get(alice.id, entry.id).await.unwrap();
    assert_eq!(still_there.entry.title, "Alpha");
}

#[tokio::test]
async fn test_update_and_delete_own_entry() {
    let (service, alice, _) = setup().await;
    let entry = service.create(alice.id, input("Alpha", 10)).await.unwrap().entry;

    let updated = service
        .update(alice.id, entry.id, input("Alpha v2", 15))
        .await
        .unwrap();
    assert_eq!(updated.entry.title, "Alpha v2");
    assert_eq!(updated.entry.value, Decimal::new(15, 0));
    assert_eq!(updated.entry.value.to_string(), "15.00");
    assert_eq!(updated.entry.created_at, entry.created_at);

    service.delete(alice.id, entry.id).await.unwrap();
    assert!(service.list_personal(alice.id).await.unwrap().is_empty());
}

#[test]
fn test_validate_entry_input() {
    assert!(validate_entry_input(input("ok", 0)).is_ok());

    assert!(matches!(
        validate_entry_input(input("   ", 1)),
        Err(ValidationError::RequiredField { field }) if field == "title"
    ));
    assert!(matches!(
        validate_entry_input(input(&"t".repeat(201), 1)),
        Err(ValidationError::TooLong { max: 200, actual: 201, .. })
    ));
    assert!(matches!(
        validate_entry_input(input("ok", -1)),
        Err(ValidationError::OutOfRange { .. })
    ));

    let mut no_category = input("ok", 1);
    no_category.category = String::new();
    assert!(matches!(
        validate_entry_input(no_category),
        Err(ValidationError::RequiredField { field }) if field == "category"
    ));
}

#[test]
fn test_entry_value_limits() {
    assert_eq!(
        normalize_entry_value(max_entry_value()).unwrap().to_string(),
        "9999999999999999.99"
    );
    assert!(matches!(
        normalize_entry_value(max_entry_value() + Decimal::new(1, 2)),
        Err(ValidationError::OutOfRange { .. })
    ));
    assert!(matches!(
        normalize_entry_value(Decimal::new(-1, 2)),
        Err(ValidationError::OutOfRange { .. })
    ));
}

#[test]
fn test_entry_value_scale() {
    assert!(matches!(
        normalize_entry_value(Decimal::new(1005, 3)),
        Err(ValidationError::TooPrecise { max_scale: 2, .. })
    ));
    assert_eq!(normalize_entry_value(Decimal::new(1500, 3)).unwrap().to_string(), "1.50");
    assert_eq!(normalize_entry_value(Decimal::new(15, 1)).unwrap().to_string(), "1.50");
    assert_eq!(normalize_entry_value(Decimal::new(-0, 4)).unwrap().to_string(), "0.00");
}

#[tokio::test]
async fn test_created_value_matches_stored_value() {
    let (service, alice, _) = setup().await;
    let mut entry = input("Precise", 0);
    entry.value = Decimal::new(12345678901234567, 1);

    let created = service.create(alice.id, entry).await.unwrap().entry;
    let fetched = service.get(alice.id, created.id).await.unwrap().entry;

    assert_eq!(created.value.to_string(), "1234567890123456.70");
    assert_eq!(fetched.value.to_string(), created.value.to_string());
}

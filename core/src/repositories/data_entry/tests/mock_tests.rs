//! Unit tests for mock data entry repository implementation

use chrono::Duration;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::data_entry::{DataEntry, DataEntryInput};
use crate::repositories::data_entry::{DataEntryRepository, MockDataEntryRepository};

fn entry(user_id: Uuid, title: &str) -> DataEntry {
    DataEntry::new(
        user_id,
        DataEntryInput {
            title: title.to_string(),
            description: String::new(),
            category: "General".to_string(),
            value: Decimal::ZERO,
        },
    )
}

#[tokio::test]
async fn test_find_by_user_is_newest_first() {
    let repo = MockDataEntryRepository::new();
    let owner = Uuid::new_v4();

    let mut older = entry(owner, "older");
    older.created_at = older.created_at - Duration::minutes(5);
    repo.create(older).await.unwrap();
    repo.create(entry(owner, "newer")).await.unwrap();
    repo.create(entry(Uuid::new_v4(), "other")).await.unwrap();

    let titles: Vec<String> = repo
        .find_by_user(owner)
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(titles, vec!["newer", "older"]);
    assert_eq!(repo.find_all().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_mutations_are_owner_scoped() {
    let repo = MockDataEntryRepository::new();
    let owner = Uuid::new_v4();
    let stranger = Uuid::new_v4();
    let stored = repo.create(entry(owner, "mine")).await.unwrap();

    let mut hijack = stored.clone();
    hijack.user_id = stranger;
    hijack.title = "hijacked".to_string();
    assert!(!repo.update(&hijack).await.unwrap());
    assert!(!repo.delete(stranger, stored.id).await.unwrap());

    assert_eq!(repo.find_by_id(stored.id).await.unwrap().unwrap().title, "mine");
    assert!(repo.delete(owner, stored.id).await.unwrap());
    assert!(repo.find_by_id(stored.id).await.unwrap().is_none());
}

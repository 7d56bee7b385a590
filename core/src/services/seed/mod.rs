//! Demo account seeding

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::entities::data_entry::{DataEntry, DataEntryInput};
use crate::domain::entities::user::{NewUser, User};
use crate::errors::DomainResult;
use crate::repositories::{DataEntryRepository, UserRepository};
use crate::services::data_entry::VALUE_SCALE;
use crate::services::password::PasswordHasher;

pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "Password!123";

/// Create the demo user with two sample entries unless it already exists
///
/// # Returns
///
/// `Ok(true)` when data was inserted, `Ok(false)` when the demo user was present
pub async fn seed_demo_data<U, D>(
    users: &U,
    entries: &D,
    hasher: &dyn PasswordHasher,
) -> DomainResult<bool>
where
    U: UserRepository + ?Sized,
    D: DataEntryRepository + ?Sized,
{
    if users.exists_by_email(DEMO_EMAIL).await? {
        info!("Demo user already present, skipping seed");
        return Ok(false);
    }

    let demo = users
        .create(User::new(NewUser {
            email: DEMO_EMAIL.to_string(),
            password_hash: hasher.hash(DEMO_PASSWORD).await?,
            first_name: "Demo".to_string(),
            last_name: "User".to_string(),
        }))
        .await?;

    for (title, description, value) in [
        ("Sample A", "Seeded item A", 10_i64),
        ("Sample B", "Seeded item B", 25),
    ] {
        entries
            .create(DataEntry::new(
                demo.id,
                DataEntryInput {
                    title: title.to_string(),
                    description: description.to_string(),
                    category: "General".to_string(),
                    value: Decimal::new(value * 100, VALUE_SCALE),
                },
            ))
            .await?;
    }

    info!(user_id = %demo.id, "Seeded demo user and sample entries");
    Ok(true)
}

//! User entity representing an account holder.

use chrono::{DateTime, Utc};
use eb_shared::validation::normalize_email;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Email as entered at registration (trimmed)
    pub email: String,

    /// Lowercased email used for uniqueness and lookup
    pub email_normalized: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub first_name: String,

    pub last_name: String,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

/// Registration data for a user that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    /// Builds a user from registration data, normalizing the email and trimming names
    pub fn new(new_user: NewUser) -> Self {
        let email = new_user.email.trim().to_string();
        Self {
            id: Uuid::new_v4(),
            email_normalized: normalize_email(&email),
            email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name.trim().to_string(),
            last_name: new_user.last_name.trim().to_string(),
            created_at: Utc::now(),
        }
    }

    /// `"{first_name} {last_name}"`
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

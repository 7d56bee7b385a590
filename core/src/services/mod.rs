//! Business services containing domain logic and use cases.

pub mod auth;
pub mod data_entry;
pub mod password;
pub mod seed;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use data_entry::DataEntryService;
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use seed::{seed_demo_data, DEMO_EMAIL, DEMO_PASSWORD};
pub use token::{TokenService, TokenServiceConfig};

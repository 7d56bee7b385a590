pub mod data_entry;
pub mod health;
pub mod token;
pub mod user;

pub use data_entry::DataEntryRepository;
pub use health::StoreHealth;
pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use data_entry::MockDataEntryRepository;
#[cfg(test)]
pub use token::MockTokenRepository;
#[cfg(test)]
pub use user::MockUserRepository;

//! In-process stores used when no database is configured.
//!
//! State lives for the lifetime of the process. Each repository guards its
//! maps with a single `tokio::sync::RwLock`, so every read-modify-write below
//! runs under one write guard.

mod data_entry_repository;
mod token_repository;
mod user_repository;


pub use data_entry_repository::InMemoryDataEntryRepository;
pub use token_repository::InMemoryTokenRepository;
pub use user_repository::InMemoryUserRepository;

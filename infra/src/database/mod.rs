//! Database module - MySQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management and health checks
//! - Embedded schema migrations
//! - Repository implementations for users, refresh tokens and data entries

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlDataEntryRepository, MySqlTokenRepository, MySqlUserRepository};

//! # Infrastructure Layer
//!
//! Concrete store implementations for the Entrybook backend.
//!
//! ## Architecture
//!
//! - **Database**: MySQL repositories using SQLx, pool management and migrations
//! - **Memory**: in-process repositories used when no database is configured
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use eb_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// In-memory store implementations
pub mod memory;

pub use memory::{InMemoryDataEntryRepository, InMemoryTokenRepository, InMemoryUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection or query error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

//! # Entrybook Core
//!
//! Core business logic and domain layer for the Entrybook backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AuthResponse, Claims, DataEntry, DataEntryInput, DataEntryView, NewUser, RefreshToken,
    TokenPair, User,
};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
pub use repositories::{DataEntryRepository, StoreHealth, TokenRepository, UserRepository};
pub use services::{AuthService, DataEntryService, PasswordHasher, TokenService};

//! MySQL repository implementations

mod data_entry_repository_impl;
mod token_repository_impl;
mod user_repository_impl;

pub use data_entry_repository_impl::MySqlDataEntryRepository;
pub use token_repository_impl::MySqlTokenRepository;
pub use user_repository_impl::MySqlUserRepository;

use eb_core::errors::DomainError;
use uuid::Uuid;

/// Wrap a driver error as an internal domain error with context
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(error = %e, "{}", context);
        DomainError::Internal {
            message: format!("{}: {}", context, e),
        }
    }
}

/// Parse a CHAR(36) column into a UUID
pub(crate) fn parse_uuid(column: &str, value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in {}: {}", column, e),
    })
}

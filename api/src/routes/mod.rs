//! Route handlers and the shared application state

pub mod auth;
pub mod data_entries;

use std::sync::Arc;

use eb_core::errors::DomainResult;
use eb_core::repositories::{DataEntryRepository, StoreHealth, TokenRepository, UserRepository};
use eb_core::services::{
    AuthService, BcryptPasswordHasher, DataEntryService, PasswordHasher, TokenService,
    TokenServiceConfig,
};
use eb_shared::AuthConfig;

/// Services shared by every handler
pub struct AppState<U, T, D>
where
    U: UserRepository,
    T: TokenRepository,
    D: DataEntryRepository,
{
    pub auth_service: Arc<AuthService<U, T>>,
    pub data_entry_service: Arc<DataEntryService<D, U>>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    /// Log decoded access token claims
    pub diagnostics: bool,
    /// Probed by `/health`; `None` for the in-memory store
    pub store_health: Option<Arc<dyn StoreHealth>>,
}

impl<U, T, D> AppState<U, T, D>
where
    U: UserRepository,
    T: TokenRepository,
    D: DataEntryRepository,
{
    /// Wire the services over the given stores
    ///
    /// Fails when the configured bcrypt cost is rejected.
    pub fn new(
        users: Arc<U>,
        tokens: T,
        entries: Arc<D>,
        config: &AuthConfig,
    ) -> DomainResult<Self> {
        let password_hasher: Arc<dyn PasswordHasher> =
            Arc::new(BcryptPasswordHasher::new(config.password.bcrypt_cost));
        let token_service = Arc::new(TokenService::new(
            tokens,
            TokenServiceConfig::from(&config.jwt),
        ));

        let auth_service = AuthService::new(
            Arc::clone(&users),
            token_service,
            Arc::clone(&password_hasher),
        )?;

        Ok(Self {
            auth_service: Arc::new(auth_service),
            data_entry_service: Arc::new(DataEntryService::new(entries, users)),
            password_hasher,
            diagnostics: config.diagnostics,
            store_health: None,
        })
    }

    /// Report the given store's reachability on `/health`
    pub fn with_store_health(mut self, probe: Arc<dyn StoreHealth>) -> Self {
        self.store_health = Some(probe);
        self
    }
}

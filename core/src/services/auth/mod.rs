//! Authentication service module
//!
//! Registration, login, refresh-token rotation, logout and access token
//! verification over the user store and the token store.

pub(crate) mod service;

#[cfg(test)]
mod tests;

pub use service::{AuthService, RegisterCommand};

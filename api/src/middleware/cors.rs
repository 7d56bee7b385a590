//! CORS middleware configuration for the browser client.

use actix_cors::Cors;
use eb_shared::CorsConfig;
use tracing::{info, warn};

/// Creates a CORS middleware instance from configuration.
///
/// A `*` entry allows any origin; credentials are then not advertised.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(config.allowed_methods.iter().map(String::as_str))
        .allowed_headers(config.allowed_headers.iter().map(String::as_str))
        .max_age(config.max_age);

    if config.allows_any_origin() {
        warn!("CORS allows any origin");
        return cors.allow_any_origin();
    }

    for origin in &config.allowed_origins {
        info!(%origin, "Adding allowed origin");
        cors = cors.allowed_origin(origin);
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

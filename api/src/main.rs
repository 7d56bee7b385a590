use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use eb_api::{create_app, telemetry, AppState};
use eb_core::repositories::{DataEntryRepository, StoreHealth, TokenRepository, UserRepository};
use eb_core::services::seed_demo_data;
use eb_infra::database::{
    DatabasePool, MySqlDataEntryRepository, MySqlTokenRepository, MySqlUserRepository,
};
use eb_infra::{InMemoryDataEntryRepository, InMemoryTokenRepository, InMemoryUserRepository};
use eb_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    telemetry::init_tracing(&config.logging);
    config.validate()?;

    info!(environment = %config.environment, "Starting Entrybook API server");
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT_SECRET not set; using the development default");
    }

    match config.database.clone() {
        Some(database) => {
            let run_migrations = database.run_migrations;
            let pool = DatabasePool::new(database)
                .await
                .context("Failed to connect to MySQL")?;
            if run_migrations {
                pool.run_migrations().await.context("Migrations failed")?;
            }
            info!("{}", pool.get_statistics());

            let pool_handle = pool.get_pool().clone();
            let result = serve(
                &config,
                Arc::new(MySqlUserRepository::new(pool_handle.clone())),
                MySqlTokenRepository::new(pool_handle.clone()),
                Arc::new(MySqlDataEntryRepository::new(pool_handle)),
                Some(Arc::new(pool.clone())),
            )
            .await;

            pool.close().await;
            result
        }
        None => {
            warn!("DATABASE_URL not set; using the in-memory store (data is lost on exit)");
            serve(
                &config,
                Arc::new(InMemoryUserRepository::new()),
                InMemoryTokenRepository::new(),
                Arc::new(InMemoryDataEntryRepository::new()),
                None,
            )
            .await
        }
    }
}

async fn serve<U, T, D>(
    config: &AppConfig,
    users: Arc<U>,
    tokens: T,
    entries: Arc<D>,
    store_health: Option<Arc<dyn StoreHealth>>,
) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
    D: DataEntryRepository + 'static,
{
    let mut state = AppState::new(
        Arc::clone(&users),
        tokens,
        Arc::clone(&entries),
        &config.auth,
    )
    .context("Failed to build application state")?;
    if let Some(probe) = store_health {
        state = state.with_store_health(probe);
    }
    let state = web::Data::new(state);

    if config.seed_demo_data {
        seed_demo_data(users.as_ref(), entries.as_ref(), state.password_hasher.as_ref())
            .await
            .context("Seeding demo data failed")?;
    }

    let server_config = config.server.clone();
    let bind_address = server_config.bind_address();
    info!(%bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone(), &server_config));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    Ok(())
}

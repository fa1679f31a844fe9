use axum_helpers::server::{create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{PostgresUserRepository, UserService};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = database::postgres::connect(config.database.clone())
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    let repository = PostgresUserRepository::new(db.clone());
    let service = UserService::new(repository);

    // Build router with API routes; create_router adds docs/middleware
    let router = create_router::<openapi::ApiDoc>(api::routes(service.clone()));

    // Merge health endpoints into the app
    // - /health: liveness check with app name/version
    // - /ready: readiness check with an actual db ping
    let app = router
        .merge(health_router(config.app))
        .merge(api::ready_router(db));

    info!("Starting {} {}", config.app.name, config.app.version);

    // Serve with graceful shutdown; the service moves into the cleanup step
    // and releases the store connection exactly once
    create_app(app, &config.server, Duration::from_secs(30), async move {
        info!("Shutting down: closing database connection");
        match service.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("user-api shutdown complete");
    Ok(())
}

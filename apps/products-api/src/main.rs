//! Products API - product catalog REST server

use axum_helpers::server::{create_production_app, create_router, health_router};
use color_eyre::Section;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        app = config.app.name,
        version = config.app.version,
        environment = ?config.environment,
        "Starting Products API"
    );

    let db = connect_from_config_with_retry(config.database.clone(), None)
        .await
        .suggestion("Check DATABASE_URL and that PostgreSQL is reachable")?;

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name).await?;
    } else {
        info!("Skipping migrations (RUN_MIGRATIONS=false)");
    }

    let state = AppState { db: db.clone() };

    let router = create_router::<openapi::ApiDoc>(
        api::routes(&state),
        &config.server,
        config.environment,
    )?;
    let app = router
        .merge(health_router(config.app))
        .merge(api::health::router(state));

    create_production_app(app, &config.server, config.shutdown_timeout, async move {
        info!("Shutting down: closing PostgreSQL connections");
        if let Err(e) = db.close().await {
            tracing::warn!(error = %e, "Failed to close PostgreSQL pool");
        }
    })
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}

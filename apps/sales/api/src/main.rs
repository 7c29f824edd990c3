use axum_helpers::{
    cors_layer_from_env,
    server::{create_production_app, create_router, health_router},
};
use core_config::tracing::{init_tracing, install_color_eyre};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation so startup errors are reported in color
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = match config.database.clone() {
        Some(database) => {
            let db = database::postgres::connect_from_config_with_retry(database, None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            database::postgres::run_migrations::<Migrator>(&db, config.app.name)
                .await
                .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

            Some(db)
        }
        None => None,
    };

    let state = AppState {
        jwt_auth: axum_helpers::JwtAuth::new(&config.jwt),
        config,
        db,
    };

    let api_routes = api::routes(&state);
    let cors = cors_layer_from_env(&state.config.environment)?;

    // Swagger UI, tracing, security headers, CORS and compression around the
    // API; /health and /ready sit beside it.
    let app = create_router::<openapi::ApiDoc>(api_routes, cors)
        .merge(health_router(state.config.app))
        .merge(api::ready_router(state.clone()));

    info!("Starting {} with graceful shutdown (30s timeout)", api::APP_TITLE);

    let AppState { config, db, .. } = state;

    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30),
        async move {
            if let Some(db) = db {
                info!("Shutting down: closing database connections");
                match db.close().await {
                    Ok(_) => info!("PostgreSQL connection closed successfully"),
                    Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
                }
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shutdown complete");
    Ok(())
}

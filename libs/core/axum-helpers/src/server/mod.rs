//! Server infrastructure: router assembly with OpenAPI docs, health and
//! readiness endpoints, graceful shutdown.
//!
//! ```ignore
//! let router = create_router::<ApiDoc>(api_routes, cors_layer_from_env(&env)?)
//!     .merge(health_router(AppInfo::new("sales-api", env!("CARGO_PKG_VERSION"))));
//!
//! create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use health::{
    AppInfo, HealthCheckFuture, HealthResponse, ReadinessReport, health_router, run_health_checks,
};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};

use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::security::security_headers;
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Wrap application routes with docs and cross-cutting middleware.
///
/// - Swagger UI at `/swagger-ui`, OpenAPI document at `/api-docs/openapi.json`
/// - JSON 404 fallback, and a JSON body for 405s
/// - request tracing, security headers, CORS, response compression
///
/// Routes are mounted at the root; domain routers apply their own state.
pub fn create_router<T>(apis: Router, cors_layer: CorsLayer) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(apis)
        .fallback(not_found)
        .layer(middleware::map_response(method_not_allowed))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        .layer(CompressionLayer::new())
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` within
/// `shutdown_timeout`.
///
/// ```ignore
/// let cleanup = async move {
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!(address = %listener.local_addr()?, "Listening");

    let cleanup_handle = tokio::spawn({
        let coordinator = coordinator.clone();
        async move {
            coordinator.stopped().await;
            if tokio::time::timeout(shutdown_timeout, cleanup).await.is_err() {
                tracing::warn!(?shutdown_timeout, "Cleanup timed out");
            } else {
                info!("Cleanup finished");
            }
        }
    });

    let serve_result = axum::serve(listener, router)
        .with_graceful_shutdown({
            let coordinator = coordinator.clone();
            async move { coordinator.wait_for_signal().await }
        })
        .await;

    if let Err(e) = &serve_result {
        tracing::error!(error = %e, "Server stopped with an error");
    }

    // An I/O failure bypasses the signal path; cleanup must still run.
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

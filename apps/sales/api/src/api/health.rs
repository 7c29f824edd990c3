//! Readiness check backed by a real database ping.

use crate::state::AppState;
use axum::extract::State;
use axum_helpers::server::{HealthCheckFuture, ReadinessReport, run_health_checks};

/// Reports `database: connected` when the pool answers `SELECT 1`. With the
/// in-memory store there is nothing to check and the service is ready.
pub async fn ready_handler(State(state): State<AppState>) -> ReadinessReport {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Some(db) = &state.db {
        checks.push((
            "database",
            Box::pin(async move {
                database::postgres::check_health(db)
                    .await
                    .map_err(|e| format!("Database ping failed: {}", e))
            }),
        ));
    }

    run_health_checks(checks).await
}

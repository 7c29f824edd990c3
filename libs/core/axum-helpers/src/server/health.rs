//! `/health` (liveness) and the building blocks for a `/ready` handler.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

/// Name and version reported by `/health`.
#[derive(Clone, Copy, Debug)]
pub struct AppInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl AppInfo {
    pub const fn new(name: &'static str, version: &'static str) -> Self {
        Self { name, version }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// One named dependency probe; `Err` carries a reason for the logs.
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Outcome of [`run_health_checks`]: `{"status": "ready", "<check>": "connected", ...}`.
#[derive(Debug, Serialize)]
pub struct ReadinessReport {
    pub status: &'static str,
    #[serde(flatten)]
    pub checks: BTreeMap<String, &'static str>,
}

impl ReadinessReport {
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

impl IntoResponse for ReadinessReport {
    fn into_response(self) -> Response {
        let status = if self.is_ready() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (status, Json(self)).into_response()
    }
}

/// Await every probe concurrently. A single failure makes the report
/// "not ready", which renders as 503.
pub async fn run_health_checks(checks: Vec<(&str, HealthCheckFuture<'_>)>) -> ReadinessReport {
    let (names, probes): (Vec<_>, Vec<_>) = checks.into_iter().unzip();

    let mut report = ReadinessReport {
        status: "ready",
        checks: BTreeMap::new(),
    };

    for (name, outcome) in names.into_iter().zip(join_all(probes).await) {
        let state = match outcome {
            Ok(()) => "connected",
            Err(reason) => {
                tracing::error!(check = name, %reason, "Readiness check failed");
                report.status = "not ready";
                "disconnected"
            }
        };
        report.checks.insert(name.to_string(), state);
    }

    report
}

async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    })
}

pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}

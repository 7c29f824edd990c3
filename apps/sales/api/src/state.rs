//! Shared application state.

use axum_helpers::JwtAuth;
use database::postgres::DatabaseConnection;

/// Built once in `main`; cloning is cheap (the pool and key material are
/// reference counted).
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// PostgreSQL pool, absent when running on the in-memory store
    pub db: Option<DatabaseConnection>,
    pub jwt_auth: JwtAuth,
}

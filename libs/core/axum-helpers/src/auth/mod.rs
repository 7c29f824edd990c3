//! Stateless JWT authentication.
//!
//! - [`JwtAuth`] signs and verifies HS256 tokens whose `sub` is the user id
//! - [`jwt_auth_middleware`] guards routes and inserts [`JwtClaims`] into the
//!   request extensions
//! - [`AuthUser`] extracts the authenticated user id in handlers
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/products", get(list_products))
//!     .route_layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod user;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims};
pub use middleware::{jwt_auth_middleware, optional_jwt_auth_middleware};
pub use user::AuthUser;

pub const MISSING_TOKEN: &str = "JWT Token is missing.";
pub const INVALID_TOKEN: &str = "Invalid JWT Token.";

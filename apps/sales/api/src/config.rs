use axum_helpers::{AppInfo, JwtConfig};
use core_config::{FromEnv, UploadConfig, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Application configuration, read once in `main` and passed down.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    /// `None` runs the API on the in-memory repositories.
    pub database: Option<PostgresConfig>,
    pub jwt: JwtConfig,
    pub upload: UploadConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=3333 by default
        let database = match std::env::var("DATABASE_URL") {
            Ok(_) => Some(PostgresConfig::from_env()?),
            Err(_) => None,
        };
        let jwt = JwtConfig::from_env()?; // JWT_SECRET is required
        let upload = UploadConfig::from_env()?;

        Ok(Self {
            app: AppInfo::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            environment,
            server,
            database,
            jwt,
            upload,
        })
    }
}

use crate::{env_or_default, env_parse_or, ConfigError, FromEnv};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3333;

/// Where the HTTP listener binds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port`, suitable for `TcpListener::bind`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl FromEnv for ServerConfig {
    /// `HOST` and `PORT`, each optional.
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::new(
            env_or_default("HOST", DEFAULT_HOST),
            env_parse_or("PORT", DEFAULT_PORT)?,
        ))
    }
}

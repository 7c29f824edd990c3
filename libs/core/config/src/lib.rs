//! Environment-driven configuration shared by the workspace crates.
//!
//! Each config struct implements [`FromEnv`]; the `env_*` helpers keep the
//! error for a bad or missing variable uniform across them.

pub mod server;
pub mod tracing;
pub mod upload;

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

pub use server::ServerConfig;
pub use upload::UploadConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable '{0}' is required but not set")]
    MissingEnvVar(String),

    #[error("Environment variable '{key}' is invalid: {details}")]
    ParseError { key: String, details: String },
}

/// Deployment flavour, selected by `APP_ENV`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// `APP_ENV=production` (any case) selects production; anything else,
    /// including unset, is development.
    pub fn from_env() -> Self {
        match env::var("APP_ENV") {
            Ok(value) if value.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }

    pub fn is_development(&self) -> bool {
        *self == Self::Development
    }
}

pub trait FromEnv: Sized {
    fn from_env() -> Result<Self, ConfigError>;
}

pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

pub fn env_required(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_owned()))
}

/// Parse `key` when set, otherwise return `default`.
pub fn env_parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };
    raw.parse().map_err(|e: T::Err| ConfigError::ParseError {
        key: key.to_owned(),
        details: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_defaults_to_development() {
        temp_env::with_var_unset("APP_ENV", || {
            let env = Environment::from_env();
            assert_eq!(env, Environment::Development);
            assert!(env.is_development());
            assert!(!env.is_production());
        });
    }

    #[test]
    fn test_environment_production_case_insensitive() {
        temp_env::with_var("APP_ENV", Some("PRODUCTION"), || {
            assert_eq!(Environment::from_env(), Environment::Production);
        });

        temp_env::with_var("APP_ENV", Some("Production"), || {
            assert!(Environment::from_env().is_production());
        });
    }

    #[test]
    fn test_environment_unknown_defaults_to_development() {
        temp_env::with_var("APP_ENV", Some("staging"), || {
            assert_eq!(Environment::from_env(), Environment::Development);
        });
    }

    #[test]
    fn test_env_or_default() {
        temp_env::with_var("SALES_TEST_VAR", Some("test_value"), || {
            assert_eq!(env_or_default("SALES_TEST_VAR", "default"), "test_value");
        });
        temp_env::with_var_unset("SALES_MISSING_VAR", || {
            assert_eq!(env_or_default("SALES_MISSING_VAR", "default"), "default");
        });
    }

    #[test]
    fn test_env_required_missing() {
        temp_env::with_var_unset("SALES_MISSING_REQUIRED", || {
            let err = env_required("SALES_MISSING_REQUIRED").unwrap_err();
            assert!(err.to_string().contains("SALES_MISSING_REQUIRED"));
            assert!(err.to_string().contains("required"));
        });
    }

    #[test]
    fn test_env_parse_or() {
        temp_env::with_var("SALES_NUMBER", Some("42"), || {
            assert_eq!(env_parse_or("SALES_NUMBER", 7u32).unwrap(), 42);
        });
        temp_env::with_var_unset("SALES_NUMBER", || {
            assert_eq!(env_parse_or("SALES_NUMBER", 7u32).unwrap(), 7);
        });
        temp_env::with_var("SALES_NUMBER", Some("many"), || {
            let err = env_parse_or("SALES_NUMBER", 7u32).unwrap_err();
            assert!(matches!(err, ConfigError::ParseError { ref key, .. } if key == "SALES_NUMBER"));
        });
    }
}

use crate::{env_or_default, ConfigError, FromEnv};
use std::path::PathBuf;

/// Where uploaded files live on disk and how they are addressed publicly.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub directory: PathBuf,
    /// Base URL the API is reachable at; `/files/<name>` is appended to it.
    pub public_url: String,
}

impl UploadConfig {
    pub fn new(directory: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            public_url: public_url.into(),
        }
    }

    pub fn file_url(&self, filename: &str) -> String {
        format!("{}/files/{}", self.public_url.trim_end_matches('/'), filename)
    }
}

impl FromEnv for UploadConfig {
    /// - UPLOAD_DIR: defaults to "uploads"
    /// - APP_API_URL: defaults to http://localhost:3333
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            directory: PathBuf::from(env_or_default("UPLOAD_DIR", "uploads")),
            public_url: env_or_default("APP_API_URL", "http://localhost:3333"),
        })
    }
}

use core_config::UploadConfig;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::UserResult;

/// Stores avatar uploads on local disk.
///
/// Files are named `<20 hex chars>-<original name>` so two uploads with the
/// same name never overwrite each other.
#[derive(Clone, Debug)]
pub struct AvatarStorage {
    config: UploadConfig,
}

impl AvatarStorage {
    pub fn new(config: UploadConfig) -> Self {
        Self { config }
    }

    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    /// Public URL for a stored filename.
    pub fn url_for(&self, filename: &str) -> String {
        self.config.file_url(filename)
    }

    /// Write `bytes` under a fresh name and return that name.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> UserResult<String> {
        tokio::fs::create_dir_all(&self.config.directory).await?;

        let prefix = const_hex::encode(rand::random::<[u8; 10]>());
        let filename = format!("{}-{}", prefix, sanitize_filename(original_name));

        tokio::fs::write(self.path_of(&filename), bytes).await?;

        tracing::debug!(filename = %filename, size = bytes.len(), "Stored avatar file");
        Ok(filename)
    }

    /// Delete a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, filename: &str) -> UserResult<()> {
        match tokio::fs::remove_file(self.path_of(filename)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn path_of(&self, filename: &str) -> PathBuf {
        self.config.directory.join(filename)
    }
}

/// Keep only the last path component and a conservative character set.
fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "avatar".to_string()
    } else {
        cleaned
    }
}

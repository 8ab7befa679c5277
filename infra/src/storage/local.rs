//! Local filesystem implementation of [`AvatarStorage`].
//!
//! Files are written to `upload_dir` and addressed publicly as
//! `<public_prefix>/<file name>`.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mz_core::services::AvatarStorage;
use mz_shared::StorageConfig;

use crate::InfrastructureError;

/// Avatar storage backed by a local directory
#[derive(Debug, Clone)]
pub struct LocalAvatarStorage {
    upload_dir: PathBuf,
    public_prefix: String,
}

impl LocalAvatarStorage {
    pub fn new(upload_dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            public_prefix: public_prefix.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build from settings, creating the upload directory if needed
    pub async fn from_config(config: &StorageConfig) -> Result<Self, InfrastructureError> {
        let storage = Self::new(&config.upload_dir, &config.public_prefix);
        tokio::fs::create_dir_all(&storage.upload_dir).await?;
        Ok(storage)
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// `profile-<millis>-<random>.<ext>`
    fn unique_file_name(extension: &str) -> String {
        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
        format!(
            "profile-{}-{}.{}",
            Utc::now().timestamp_millis(),
            suffix,
            extension
        )
    }

    /// Resolve a public path to a file inside `upload_dir`.
    ///
    /// `Ok(None)` for paths this storage never issued (e.g. a federated
    /// provider's avatar URL); `Err` for names that would escape the directory.
    fn resolve(&self, public_path: &str) -> Result<Option<PathBuf>, String> {
        let Some(file_name) = public_path
            .strip_prefix(&self.public_prefix)
            .and_then(|rest| rest.strip_prefix('/'))
        else {
            return Ok(None);
        };

        if file_name.is_empty()
            || file_name.contains(['/', '\\'])
            || file_name == "."
            || file_name == ".."
        {
            return Err(format!("Refusing to touch file outside uploads: {}", public_path));
        }

        Ok(Some(self.upload_dir.join(file_name)))
    }
}

#[async_trait]
impl AvatarStorage for LocalAvatarStorage {
    async fn store(&self, extension: &str, bytes: &[u8]) -> Result<String, String> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| format!("Failed to create upload directory: {}", e))?;

        let file_name = Self::unique_file_name(extension);
        let target = self.upload_dir.join(&file_name);
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| format!("Failed to write {}: {}", target.display(), e))?;

        tracing::debug!(
            event = "avatar_file_stored",
            file = %file_name,
            size = bytes.len(),
            "Avatar file written"
        );

        Ok(format!("{}/{}", self.public_prefix, file_name))
    }

    async fn remove(&self, public_path: &str) -> Result<(), String> {
        let Some(target) = self.resolve(public_path)? else {
            tracing::debug!(
                event = "avatar_file_foreign",
                path = %public_path,
                "Avatar path not managed by local storage, skipping"
            );
            return Ok(());
        };

        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("Failed to delete {}: {}", target.display(), e)),
        }
    }
}

//! Avatar upload storage configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Where uploaded profile images live and how they are addressed
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory on disk that receives uploaded files
    pub upload_dir: String,

    /// URL path prefix recorded on the user (joined with the file name)
    pub public_prefix: String,

    /// Upper bound for one uploaded image, in bytes
    pub max_avatar_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: String::from("uploads/profiles"),
            public_prefix: String::from("/uploads/profiles"),
            max_avatar_bytes: 5 * 1024 * 1024,
        }
    }
}

impl StorageConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or(defaults.upload_dir),
            public_prefix: std::env::var("UPLOAD_PUBLIC_PREFIX")
                .map(|prefix| prefix.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_prefix),
            max_avatar_bytes: env_or("MAX_AVATAR_BYTES", defaults.max_avatar_bytes),
        }
    }
}

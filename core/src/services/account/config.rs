//! Configuration for the account service

use mz_shared::{AuthConfig, StorageConfig};

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// bcrypt cost for new password hashes
    pub bcrypt_cost: u32,
    /// Largest accepted avatar, in bytes
    pub max_avatar_bytes: usize,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: 12,
            max_avatar_bytes: 5 * 1024 * 1024,
        }
    }
}

impl AccountServiceConfig {
    pub fn from_settings(auth: &AuthConfig, storage: &StorageConfig) -> Self {
        Self {
            bcrypt_cost: auth.bcrypt_cost,
            max_avatar_bytes: storage.max_avatar_bytes,
        }
    }
}

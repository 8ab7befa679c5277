//! Authentication configuration
//!
//! Bearer tokens are issued by the login service; this backend only
//! verifies them, so the configuration carries the shared secret and the
//! password hashing cost used for credential changes.

use serde::{Deserialize, Serialize};

use super::env_or;

/// Placeholder secret used when `JWT_SECRET` is unset; refused in production
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the token issuer
    pub jwt_secret: String,

    /// bcrypt cost factor for new password hashes
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::from(DEFAULT_JWT_SECRET),
            bcrypt_cost: 12,
        }
    }
}

impl AuthConfig {
    /// Create a new configuration with secret
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }

    /// True when the secret is empty or still the built-in placeholder
    pub fn uses_placeholder_secret(&self) -> bool {
        let secret = self.jwt_secret.trim();
        secret.is_empty() || secret == DEFAULT_JWT_SECRET
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            bcrypt_cost: env_or("BCRYPT_COST", defaults.bcrypt_cost),
        }
    }
}

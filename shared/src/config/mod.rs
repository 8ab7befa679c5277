//! Configuration module with business-specific sub-modules
//!
//! Every section is read from environment variables (a `.env` file is loaded
//! by the binary before any of these run):
//! - `auth` - JWT verification and password hashing
//! - `database` - MySQL connection pool
//! - `environment` - Environment detection and logging
//! - `mail` - Mail relay used for verification codes
//! - `server` - HTTP server and public URL settings
//! - `storage` - Avatar upload storage
//! - `verification` - Verification code lifetime

pub mod auth;
pub mod database;
pub mod environment;
pub mod mail;
pub mod server;
pub mod storage;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::{MailConfig, MailProvider};
pub use server::ServerConfig;
pub use storage::StorageConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub mail: MailConfig,
    pub storage: StorageConfig,
    pub verification: VerificationConfig,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let environment = Environment::default();
        Self {
            environment,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            mail: MailConfig::default(),
            storage: StorageConfig::default(),
            verification: VerificationConfig::default(),
            logging: LoggingConfig::for_environment(environment),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(environment),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            mail: MailConfig::from_env(),
            storage: StorageConfig::from_env(),
            verification: VerificationConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.is_production()
    }

    /// Refuse settings that must never reach production
    pub fn validate(&self) -> Result<(), String> {
        if self.is_production() && self.auth.uses_placeholder_secret() {
            return Err(String::from(
                "JWT_SECRET must be set to a non-default value in production",
            ));
        }
        Ok(())
    }
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is unset or unparsable.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// Read a boolean flag; accepts `true`/`1`/`yes`/`on` case-insensitively.
pub(crate) fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(value) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

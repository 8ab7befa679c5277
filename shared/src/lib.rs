//! Shared utilities and common types for the Muza Life account backend
//!
//! This crate provides functionality used by every server crate:
//! - Configuration loaded from the environment
//! - Response envelopes shared by all endpoints
//! - Language detection for localized messages
//! - Input validation helpers (email, password, names)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, LogFormat, LoggingConfig, MailConfig,
    MailProvider, ServerConfig, StorageConfig, VerificationConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, Language};
pub use utils::validation;

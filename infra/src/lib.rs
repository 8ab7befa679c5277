//! # Infrastructure Layer
//!
//! Concrete adapters for the interfaces declared in `mz_core`:
//!
//! - **Database**: MySQL repositories using SQLx, plus embedded migrations
//! - **Mail**: SMTP delivery through lettre and a logging mock transport
//! - **Storage**: avatar files on the local filesystem

pub mod database;
pub mod mail;
pub mod storage;

pub use database::{
    DatabasePool, MySqlPurchaseRepository, MySqlUserRepository, MySqlVerificationCodeRepository,
};
pub use mail::{create_mail_transport, MockMailTransport, SmtpMailTransport};
pub use storage::LocalAvatarStorage;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail transport error
    #[error("Mail transport error: {0}")]
    Mail(String),

    /// File storage error
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

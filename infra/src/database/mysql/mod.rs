//! MySQL repository implementations

mod purchase_repository_impl;
mod user_repository_impl;
mod verification_code_repository_impl;

pub use purchase_repository_impl::MySqlPurchaseRepository;
pub use user_repository_impl::MySqlUserRepository;
pub use verification_code_repository_impl::MySqlVerificationCodeRepository;

use mz_core::errors::DomainError;

/// Map a SQLx failure to an internal domain error, logging the cause
pub(crate) fn db_error(action: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(event = "db_query_failed", action, error = %e, "Database operation failed");
        DomainError::Internal {
            message: format!("Failed to {}: {}", action, e),
        }
    }
}

/// Map a column read failure to an internal domain error
pub(crate) fn column_error(column: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}

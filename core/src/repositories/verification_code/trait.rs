//! Persistence of email verification codes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::verification_code::{VerificationCode, VerificationPurpose};
use crate::errors::DomainError;

/// Code store
///
/// Implementations must keep at most one active (unused, unexpired) code per
/// email and must never let the same code be consumed twice.
#[async_trait]
pub trait VerificationCodeRepository: Send + Sync {
    /// Mark every unused code for `code.email` as used, then insert `code`.
    /// Both steps commit together.
    ///
    /// # Returns
    /// The stored code with its store-assigned id
    async fn replace_active(&self, code: VerificationCode) -> Result<VerificationCode, DomainError>;

    /// Consume a matching unused code that is still valid at `now`.
    /// With `purpose` set, only a code issued for that purpose matches.
    ///
    /// # Returns
    /// * `Ok(true)` - The code matched and is now marked used
    /// * `Ok(false)` - No unused, unexpired row for this `(email, code)`
    async fn consume(
        &self,
        email: &str,
        code: &str,
        purpose: Option<VerificationPurpose>,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Whether an unused code valid at `now` exists for `email`, any purpose
    async fn has_active(&self, email: &str, now: DateTime<Utc>) -> Result<bool, DomainError>;

    /// Physically delete rows for `(email, code)`
    ///
    /// # Returns
    /// Number of rows deleted
    async fn delete(&self, email: &str, code: &str) -> Result<u64, DomainError>;
}

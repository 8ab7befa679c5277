//! Main verification service implementation

use chrono::Utc;
use std::sync::Arc;

use mz_shared::validation::{is_verification_code_format, mask_email};

use crate::domain::entities::verification_code::{VerificationCode, VerificationPurpose};
use crate::errors::DomainResult;
use crate::repositories::VerificationCodeRepository;

use super::config::VerificationServiceConfig;
use super::types::VerifyCodeResult;

/// Verification service issuing and checking email codes
pub struct VerificationService<V: VerificationCodeRepository> {
    /// Code store
    code_repository: Arc<V>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<V: VerificationCodeRepository> VerificationService<V> {
    /// Create a new verification service
    pub fn new(code_repository: Arc<V>, config: VerificationServiceConfig) -> Self {
        Self {
            code_repository,
            config,
        }
    }

    /// Issue a new code for `email`
    ///
    /// Every unused code previously issued for the address is marked used in
    /// the same storage transaction, so only the returned code stays active.
    ///
    /// # Returns
    ///
    /// * `Ok(VerificationCode)` - The stored code, ready for delivery
    /// * `Err(DomainError::Internal)` - If the code store fails
    pub async fn create_code(
        &self,
        email: &str,
        purpose: VerificationPurpose,
    ) -> DomainResult<VerificationCode> {
        let code = VerificationCode::new_with_expiration(
            email.to_string(),
            purpose,
            self.config.code_expiration_minutes,
        );

        let stored = self.code_repository.replace_active(code).await.map_err(|e| {
            tracing::error!(
                email = %mask_email(email),
                error = %e,
                event = "verification_code_store_failed",
                "Failed to store verification code"
            );
            e
        })?;

        tracing::info!(
            email = %mask_email(email),
            purpose = %purpose,
            code_id = stored.id,
            expires_at = %stored.expires_at,
            event = "verification_code_issued",
            "Issued verification code"
        );

        Ok(stored)
    }

    /// Verify and consume a code
    ///
    /// A wrong code and an expired code produce the same rejection. Codes that
    /// are not six ASCII digits are rejected without a store lookup.
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<VerifyCodeResult> {
        self.check_code(email, code, None).await
    }

    /// Verify and consume a code issued for `purpose`. A code from another
    /// flow is rejected like a wrong one.
    pub async fn verify_code_for(
        &self,
        email: &str,
        code: &str,
        purpose: VerificationPurpose,
    ) -> DomainResult<VerifyCodeResult> {
        self.check_code(email, code, Some(purpose)).await
    }

    async fn check_code(
        &self,
        email: &str,
        code: &str,
        purpose: Option<VerificationPurpose>,
    ) -> DomainResult<VerifyCodeResult> {
        if !is_verification_code_format(code) {
            tracing::warn!(
                email = %mask_email(email),
                code_length = code.len(),
                event = "invalid_code_format",
                "Malformed verification code provided"
            );
            return Ok(VerifyCodeResult::invalid());
        }

        let consumed = self
            .code_repository
            .consume(email, code, purpose, Utc::now())
            .await
            .map_err(|e| {
                tracing::error!(
                    email = %mask_email(email),
                    error = %e,
                    event = "verification_code_check_failed",
                    "System error during code verification"
                );
                e
            })?;

        if consumed {
            tracing::info!(
                email = %mask_email(email),
                event = "verification_code_consumed",
                "Verification code accepted"
            );
            Ok(VerifyCodeResult::valid())
        } else {
            tracing::warn!(
                email = %mask_email(email),
                event = "verification_code_rejected",
                "Invalid or expired verification code"
            );
            Ok(VerifyCodeResult::invalid())
        }
    }

    /// True when an unused, unexpired code exists for `email`, whatever its purpose
    pub async fn has_pending_verification(&self, email: &str) -> DomainResult<bool> {
        self.code_repository.has_active(email, Utc::now()).await
    }

    /// Delete a code row; failures are logged and swallowed
    pub async fn discard_code(&self, email: &str, code: &str) {
        if let Err(e) = self.code_repository.delete(email, code).await {
            tracing::warn!(
                email = %mask_email(email),
                error = %e,
                event = "verification_code_cleanup_failed",
                "Failed to delete verification code"
            );
        }
    }
}

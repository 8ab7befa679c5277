//! Email change service implementation

use std::sync::Arc;

use mz_shared::validation::{is_blank, is_valid_email, mask_email};

use crate::domain::entities::verification_code::VerificationPurpose;
use crate::errors::{AccountError, DomainResult, ValidationError};
use crate::repositories::{EmailChangeCommit, UserRepository, VerificationCodeRepository};
use crate::services::notification::{MailTransport, NotificationService};
use crate::services::verification::VerificationService;

use super::config::EmailChangeConfig;
use super::types::{EmailChangeInitiated, EmailChanged};

/// Drives the initiate / verify / resend steps of an email change
pub struct EmailChangeService<U, V, M>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    M: MailTransport,
{
    user_repository: Arc<U>,
    verification_service: Arc<VerificationService<V>>,
    notification_service: Arc<NotificationService<M>>,
    config: EmailChangeConfig,
}

impl<U, V, M> EmailChangeService<U, V, M>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    M: MailTransport,
{
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<V>>,
        notification_service: Arc<NotificationService<M>>,
        config: EmailChangeConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            notification_service,
            config,
        }
    }

    fn require_email(field: &str, email: &str) -> DomainResult<()> {
        if is_blank(email) {
            return Err(ValidationError::required(field).into());
        }
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        Ok(())
    }

    /// Start a change to `new_email`
    ///
    /// Preconditions are checked in order and any failure leaves no trace:
    /// well-formed address, existing user, address differs from the current
    /// one, address not owned by another account, no pending code for it.
    ///
    /// # Returns
    ///
    /// * `Ok(EmailChangeInitiated)` - Code stored and mailed to `new_email`
    /// * `Err(AccountError::EmailExists)` - Another account owns `new_email`
    /// * `Err(AccountError::PendingEmailChange)` - A code for `new_email` is still active
    /// * `Err(AccountError::MailDeliveryFailed)` - The code was discarded again
    pub async fn initiate(&self, user_id: i64, new_email: &str) -> DomainResult<EmailChangeInitiated> {
        Self::require_email("newEmail", new_email)?;

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        if user.email == new_email {
            return Err(AccountError::SameEmail.into());
        }

        if self.user_repository.email_taken(new_email, Some(user_id)).await? {
            tracing::warn!(
                user_id,
                new_email = %mask_email(new_email),
                event = "email_change_address_taken",
                "Requested email belongs to another account"
            );
            return Err(AccountError::EmailExists.into());
        }

        if self.verification_service.has_pending_verification(new_email).await? {
            return Err(AccountError::PendingEmailChange.into());
        }

        let code = self
            .verification_service
            .create_code(new_email, VerificationPurpose::EmailChange)
            .await?;

        if let Err(e) = self
            .notification_service
            .send_verification_code(new_email, &code.code, VerificationPurpose::EmailChange)
            .await
        {
            // An undelivered code must not count as pending
            self.verification_service.discard_code(new_email, &code.code).await;
            return Err(e);
        }

        tracing::info!(
            user_id,
            new_email = %mask_email(new_email),
            event = "email_change_initiated",
            "Email change code sent"
        );

        Ok(EmailChangeInitiated {
            email: new_email.to_string(),
            current_email: user.email,
        })
    }

    /// Confirm a change with the code sent to `new_email`
    ///
    /// On a valid code the uniqueness re-check, the email update and the
    /// removal of the consumed code commit together.
    pub async fn verify(&self, user_id: i64, new_email: &str, code: &str) -> DomainResult<EmailChanged> {
        if is_blank(new_email) {
            return Err(ValidationError::required("newEmail").into());
        }
        if is_blank(code) {
            return Err(ValidationError::required("verificationCode").into());
        }

        let result = self
            .verification_service
            .verify_code_for(new_email, code, VerificationPurpose::EmailChange)
            .await?;
        if !result.is_valid {
            return Err(AccountError::InvalidVerificationCode.into());
        }

        let previous_email = if self.config.notify_previous_email {
            self.user_repository
                .find_by_id(user_id)
                .await?
                .map(|user| user.email)
        } else {
            None
        };

        let user = match self
            .user_repository
            .commit_email_change(user_id, new_email, code)
            .await?
        {
            EmailChangeCommit::Committed(user) => user,
            EmailChangeCommit::EmailTaken => {
                tracing::warn!(
                    user_id,
                    new_email = %mask_email(new_email),
                    event = "email_change_lost_race",
                    "Email was claimed by another account before commit"
                );
                return Err(AccountError::UserExists.into());
            }
            EmailChangeCommit::UserNotFound => return Err(AccountError::UserNotFound.into()),
        };

        tracing::info!(
            user_id,
            new_email = %mask_email(new_email),
            event = "email_changed",
            "Email change committed"
        );

        if let Some(previous) = previous_email.filter(|previous| previous != new_email) {
            if let Err(e) = self
                .notification_service
                .send_email_changed_notice(&previous, new_email)
                .await
            {
                tracing::warn!(
                    user_id,
                    error = %e,
                    event = "email_changed_notice_failed",
                    "Failed to notify previous address"
                );
            }
        }

        Ok(EmailChanged {
            id: user.id,
            email: user.email,
        })
    }

    /// Issue a fresh code for `email`, superseding any earlier one
    ///
    /// Unlike [`initiate`](Self::initiate) this does not refuse when a code is
    /// still pending; that is what resending is for.
    pub async fn resend(&self, user_id: i64, email: &str) -> DomainResult<()> {
        Self::require_email("email", email)?;

        if self.user_repository.email_taken(email, None).await? {
            return Err(AccountError::EmailExists.into());
        }

        let code = self
            .verification_service
            .create_code(email, VerificationPurpose::EmailChange)
            .await?;

        self.notification_service
            .send_verification_code(email, &code.code, VerificationPurpose::EmailChange)
            .await?;

        tracing::info!(
            user_id,
            email = %mask_email(email),
            event = "email_change_code_resent",
            "Email change code resent"
        );
        Ok(())
    }
}

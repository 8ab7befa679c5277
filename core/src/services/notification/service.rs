//! Notification service rendering and dispatching emails

use std::sync::Arc;

use mz_shared::validation::mask_email;
use mz_shared::{MailConfig, VerificationConfig};

use crate::domain::entities::verification_code::{VerificationPurpose, DEFAULT_EXPIRATION_MINUTES};
use crate::errors::{AccountError, DomainResult};

use super::templates::MailTemplates;
use super::traits::MailTransport;

/// Configuration for the notification service
#[derive(Debug, Clone)]
pub struct NotificationServiceConfig {
    /// Product name shown in subjects and bodies
    pub brand_name: String,
    /// Validity announced in verification emails
    pub code_ttl_minutes: i64,
}

impl Default for NotificationServiceConfig {
    fn default() -> Self {
        Self {
            brand_name: String::from("Muza Life"),
            code_ttl_minutes: DEFAULT_EXPIRATION_MINUTES,
        }
    }
}

impl NotificationServiceConfig {
    pub fn from_settings(mail: &MailConfig, verification: &VerificationConfig) -> Self {
        Self {
            brand_name: mail.brand_name.clone(),
            code_ttl_minutes: verification.code_ttl_minutes,
        }
    }
}

/// Sends verification codes and account notices through a [`MailTransport`]
pub struct NotificationService<M: MailTransport> {
    transport: Arc<M>,
    templates: MailTemplates,
    config: NotificationServiceConfig,
}

impl<M: MailTransport> NotificationService<M> {
    pub fn new(transport: Arc<M>, config: NotificationServiceConfig) -> Self {
        Self {
            transport,
            templates: MailTemplates::new(),
            config,
        }
    }

    /// Deliver a verification code
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Transport message id
    /// * `Err(AccountError::MailDeliveryFailed)` - If the transport rejects the message
    pub async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        purpose: VerificationPurpose,
    ) -> DomainResult<String> {
        let mail = self.templates.verification_code(
            &self.config.brand_name,
            purpose,
            code,
            self.config.code_ttl_minutes,
        )?;

        let message_id = self
            .transport
            .send(email, &mail.subject, &mail.html, &mail.text)
            .await
            .map_err(|reason| {
                tracing::error!(
                    email = %mask_email(email),
                    transport = self.transport.name(),
                    error = %reason,
                    event = "verification_email_failed",
                    "Failed to send verification email"
                );
                AccountError::MailDeliveryFailed { reason }
            })?;

        tracing::info!(
            email = %mask_email(email),
            purpose = %purpose,
            message_id = %message_id,
            event = "verification_email_sent",
            "Verification email sent"
        );

        Ok(message_id)
    }

    /// Tell the previous address that the account email changed
    pub async fn send_email_changed_notice(
        &self,
        previous_email: &str,
        new_email: &str,
    ) -> DomainResult<String> {
        let mail = self
            .templates
            .email_changed_notice(&self.config.brand_name, new_email)?;

        let message_id = self
            .transport
            .send(previous_email, &mail.subject, &mail.html, &mail.text)
            .await
            .map_err(|reason| AccountError::MailDeliveryFailed { reason })?;

        tracing::info!(
            email = %mask_email(previous_email),
            message_id = %message_id,
            event = "email_changed_notice_sent",
            "Email change notice sent"
        );

        Ok(message_id)
    }
}

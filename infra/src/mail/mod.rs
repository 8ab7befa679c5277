//! Mail Transport Module
//!
//! Delivery of the verification and notice mails rendered by
//! `mz_core::services::notification`:
//!
//! - **SMTP**: lettre `AsyncSmtpTransport` on the tokio runtime
//! - **Mock**: logs instead of sending and records messages for tests

pub mod mock_mail;
pub mod smtp;

pub use mock_mail::{MockMailTransport, SentMessage};
pub use smtp::SmtpMailTransport;

use mz_core::services::MailTransport;
use mz_shared::{MailConfig, MailProvider};

use crate::InfrastructureError;

/// Create a mail transport based on configuration
///
/// # Returns
/// A boxed transport, or a configuration error when the SMTP settings
/// cannot be turned into a transport
pub fn create_mail_transport(
    config: &MailConfig,
) -> Result<Box<dyn MailTransport>, InfrastructureError> {
    match config.provider {
        MailProvider::Smtp => {
            if !config.has_credentials() {
                tracing::warn!(
                    event = "mail_no_credentials",
                    host = %config.smtp_host,
                    "SMTP credentials not configured, connecting without authentication"
                );
            }
            let transport = SmtpMailTransport::new(config)?;
            tracing::info!(
                event = "mail_transport_ready",
                provider = "smtp",
                host = %config.smtp_host,
                port = config.smtp_port,
                "Mail transport initialized"
            );
            Ok(Box::new(transport))
        }
        MailProvider::Mock => {
            tracing::info!(
                event = "mail_transport_ready",
                provider = "mock",
                "Mail transport initialized, messages will be logged only"
            );
            Ok(Box::new(MockMailTransport::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_defaults_to_mock() {
        let transport = create_mail_transport(&MailConfig::default()).unwrap();
        assert_eq!(transport.name(), "mock");
    }

    #[test]
    fn test_factory_builds_smtp() {
        let config = MailConfig {
            provider: MailProvider::Smtp,
            smtp_host: "localhost".to_string(),
            smtp_port: 1025,
            ..MailConfig::default()
        };
        let transport = create_mail_transport(&config).unwrap();
        assert_eq!(transport.name(), "smtp");
    }

    #[test]
    fn test_factory_rejects_bad_sender() {
        let config = MailConfig {
            provider: MailProvider::Smtp,
            from: "not an address".to_string(),
            ..MailConfig::default()
        };
        assert!(matches!(
            create_mail_transport(&config),
            Err(InfrastructureError::Config(_))
        ));
    }
}

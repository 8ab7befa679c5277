//! SMTP mail transport using lettre

use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use mz_core::services::MailTransport;
use mz_shared::validation::mask_email;
use mz_shared::MailConfig;

use crate::InfrastructureError;

/// SMTP mail transport
///
/// `SMTP_SECURE=true` uses implicit TLS (port 465). Otherwise STARTTLS is
/// negotiated when credentials are configured, and a plain connection is
/// used for credential-less local relays such as Mailpit.
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailTransport {
    /// Create a transport from mail settings. No connection is opened here.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid EMAIL_FROM: {}", e)))?;

        let credentials = match (&config.smtp_user, &config.smtp_password) {
            (Some(user), Some(password)) => Some(Credentials::new(user.clone(), password.clone())),
            _ => None,
        };

        let builder = if config.smtp_secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| InfrastructureError::Mail(format!("Failed to create SMTP relay: {}", e)))?
        } else if credentials.is_some() {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                .map_err(|e| InfrastructureError::Mail(format!("Failed to create SMTP relay: {}", e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };

        let builder = builder.port(config.smtp_port);
        let transport = match credentials {
            Some(credentials) => builder.credentials(credentials).build(),
            None => builder.build(),
        };

        Ok(Self { transport, from })
    }

    /// Build a `multipart/alternative` message with plain text and HTML bodies
    pub fn build_message(
        &self,
        to: &str,
        subject: &str,
        html: &str,
        text: &str,
    ) -> Result<Message, String> {
        let to: Mailbox = to
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .multipart(MultiPart::alternative_plain_html(
                text.to_string(),
                html.to_string(),
            ))
            .map_err(|e| format!("Failed to build message: {}", e))
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, to: &str, subject: &str, html: &str, text: &str) -> Result<String, String> {
        let message = self.build_message(to, subject, html, text)?;

        match self.transport.send(message).await {
            Ok(response) => {
                let reply = response.message().collect::<Vec<_>>().join(" ");
                tracing::info!(
                    event = "mail_sent",
                    provider = "smtp",
                    to = %mask_email(to),
                    code = %response.code(),
                    "Mail accepted by relay"
                );
                Ok(reply)
            }
            Err(e) => {
                tracing::error!(
                    event = "mail_send_failed",
                    provider = "smtp",
                    to = %mask_email(to),
                    error = %e,
                    "SMTP delivery failed"
                );
                Err(e.to_string())
            }
        }
    }

    fn name(&self) -> &str {
        "smtp"
    }
}

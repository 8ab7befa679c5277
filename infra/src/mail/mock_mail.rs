//! Mock Mail Transport Implementation
//!
//! Logs messages instead of sending them. Every message is also kept in
//! memory so tests can read back the codes that were delivered.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use mz_core::services::MailTransport;
use mz_shared::validation::{mask_email, VERIFICATION_CODE_LENGTH};

/// A message accepted by [`MockMailTransport`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Mock mail transport for development and testing
///
/// Clones share the message log, counter and failure switch.
#[derive(Clone, Default)]
pub struct MockMailTransport {
    messages: Arc<Mutex<Vec<SentMessage>>>,
    message_count: Arc<AtomicU64>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Enable or disable failure simulation
    pub fn set_simulate_failure(&self, simulate: bool) {
        self.simulate_failure.store(simulate, Ordering::SeqCst);
    }

    /// Messages delivered to `to`, oldest first
    pub async fn messages_to(&self, to: &str) -> Vec<SentMessage> {
        self.messages
            .lock()
            .await
            .iter()
            .filter(|message| message.to == to)
            .cloned()
            .collect()
    }

    /// The verification code in the latest message sent to `to`
    pub async fn last_code_sent_to(&self, to: &str) -> Option<String> {
        let messages = self.messages.lock().await;
        let message = messages.iter().rev().find(|message| message.to == to)?;
        extract_code(&message.text)
    }
}

/// First standalone run of exactly six digits
fn extract_code(text: &str) -> Option<String> {
    text.split(|c: char| !c.is_ascii_digit())
        .find(|token| token.len() == VERIFICATION_CODE_LENGTH)
        .map(str::to_string)
}

#[async_trait]
impl MailTransport for MockMailTransport {
    async fn send(&self, to: &str, subject: &str, html: &str, text: &str) -> Result<String, String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            warn!(
                event = "mail_send_failed",
                provider = "mock",
                to = %mask_email(to),
                "Mock mail transport simulating failure"
            );
            return Err("Simulated mail delivery failure".to_string());
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("mock-{}", count);

        self.messages.lock().await.push(SentMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
            text: text.to_string(),
        });

        info!(
            event = "mail_sent",
            provider = "mock",
            to = %mask_email(to),
            message_id = %message_id,
            subject = %subject,
            "Mail logged (mock)"
        );

        Ok(message_id)
    }

    fn name(&self) -> &str {
        "mock"
    }
}

//! Trait for mail transport integration

use async_trait::async_trait;

/// Trait for mail transport integration
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Send one `multipart/alternative` message (HTML plus plain text)
    ///
    /// # Returns
    /// * `Ok(String)` - Transport message id
    /// * `Err(String)` - Transport failure description
    async fn send(&self, to: &str, subject: &str, html: &str, text: &str) -> Result<String, String>;

    /// Transport name for logs
    fn name(&self) -> &str {
        "mail"
    }
}

#[async_trait]
impl<T: MailTransport + ?Sized> MailTransport for Box<T> {
    async fn send(&self, to: &str, subject: &str, html: &str, text: &str) -> Result<String, String> {
        (**self).send(to, subject, html, text).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

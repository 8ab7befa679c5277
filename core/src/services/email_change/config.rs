use mz_shared::MailConfig;

/// Configuration for the email change flow
#[derive(Debug, Clone, Default)]
pub struct EmailChangeConfig {
    /// Send a best-effort notice to the previous address after a change
    pub notify_previous_email: bool,
}

impl From<&MailConfig> for EmailChangeConfig {
    fn from(config: &MailConfig) -> Self {
        Self {
            notify_previous_email: config.notify_previous_email,
        }
    }
}

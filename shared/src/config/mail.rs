//! Mail relay configuration

use serde::{Deserialize, Serialize};

use super::{env_flag, env_or};

/// Which mail transport to construct at start-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Real SMTP relay
    Smtp,
    /// Log messages instead of sending them
    #[default]
    Mock,
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(MailProvider::Smtp),
            "mock" | "console" => Ok(MailProvider::Mock),
            _ => Err(format!("Invalid mail provider: {}", s)),
        }
    }
}

/// SMTP relay configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    pub provider: MailProvider,

    pub smtp_host: String,

    pub smtp_port: u16,

    /// Implicit TLS (port 465 style); otherwise STARTTLS is used when credentials are set
    pub smtp_secure: bool,

    #[serde(default)]
    pub smtp_user: Option<String>,

    #[serde(default, skip_serializing)]
    pub smtp_password: Option<String>,

    /// `From` header, e.g. `"Muza Life" <noreply@muzalife.com>`
    pub from: String,

    /// Product name used in subjects and templates
    pub brand_name: String,

    /// Send a notice to the previous address after an email change
    #[serde(default)]
    pub notify_previous_email: bool,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::default(),
            smtp_host: String::from("smtp.gmail.com"),
            smtp_port: 587,
            smtp_secure: false,
            smtp_user: None,
            smtp_password: None,
            from: String::from("\"Muza Life\" <noreply@muzalife.com>"),
            brand_name: String::from("Muza Life"),
            notify_previous_email: false,
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("MAIL_PROVIDER")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.provider),
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: env_or("SMTP_PORT", defaults.smtp_port),
            smtp_secure: env_flag("SMTP_SECURE", defaults.smtp_secure),
            smtp_user: std::env::var("SMTP_USER").ok().filter(|v| !v.is_empty()),
            smtp_password: std::env::var("SMTP_PASSWORD").ok().filter(|v| !v.is_empty()),
            from: std::env::var("EMAIL_FROM").unwrap_or(defaults.from),
            brand_name: std::env::var("BRAND_NAME").unwrap_or(defaults.brand_name),
            notify_previous_email: env_flag(
                "NOTIFY_PREVIOUS_EMAIL",
                defaults.notify_previous_email,
            ),
        }
    }

    /// Whether both SMTP credentials are present
    pub fn has_credentials(&self) -> bool {
        self.smtp_user.is_some() && self.smtp_password.is_some()
    }
}

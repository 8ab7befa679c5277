//! Outgoing email: verification codes and account notices
//!
//! The transport is injected through [`MailTransport`], so the SMTP relay,
//! the logging mock and test recorders are interchangeable.

mod service;
mod templates;
mod traits;


pub use service::{NotificationService, NotificationServiceConfig};
pub use templates::RenderedMail;
pub use traits::MailTransport;

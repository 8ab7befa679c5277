//! Business services containing domain logic and use cases.

pub mod account;
pub mod email_change;
pub mod notification;
pub mod purchase;
pub mod verification;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig, AvatarStorage, AvatarUpload};
pub use email_change::{EmailChangeConfig, EmailChangeInitiated, EmailChangeService, EmailChanged};
pub use notification::{MailTransport, NotificationService, NotificationServiceConfig, RenderedMail};
pub use purchase::PurchaseService;
pub use verification::{VerificationService, VerificationServiceConfig, VerifyCodeResult};

//! # Muza Life Core
//!
//! Domain layer of the account backend: entities, the error taxonomy,
//! repository and transport interfaces, and the services implementing
//! verification codes, email changes, account self-service and purchases.
//! Infrastructure adapters live in `mz_infra`; HTTP lives in `mz_api`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Purchase, User, VerificationCode, VerificationPurpose};
pub use errors::{localize, AccountError, DomainError, DomainResult, ValidationError};
pub use repositories::{
    EmailChangeCommit, MockPurchaseRepository, MockUserRepository,
    MockVerificationCodeRepository, PurchaseRepository, UserRepository,
    VerificationCodeRepository,
};
pub use services::{
    AccountService, AccountServiceConfig, AvatarStorage, AvatarUpload, EmailChangeConfig,
    EmailChangeInitiated, EmailChangeService, EmailChanged, MailTransport, NotificationService,
    NotificationServiceConfig, PurchaseService, VerificationService, VerificationServiceConfig,
    VerifyCodeResult,
};

//! Account and validation error types with bilingual messages
//!
//! Every message is written as `English | Українська`; the presentation
//! layer picks the half matching the caller's language.

use mz_shared::{error_codes, Language};
use thiserror::Error;

/// Errors raised by account, email-change and purchase operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("User not found | Користувача не знайдено")]
    UserNotFound,

    #[error("This email is already taken by another user | Цей email вже зайнятий іншим користувачем")]
    EmailExists,

    #[error("A verification code for this email change has already been sent. Check your inbox | Код підтвердження для зміни email вже відправлено. Перевірте вашу пошту.")]
    PendingEmailChange,

    #[error("Invalid or expired code | Невірний або прострочений код")]
    InvalidVerificationCode,

    #[error("A user with this email already exists | Користувач з таким email вже існує")]
    UserExists,

    #[error("The new email cannot be the same as the current one | Новий email не може бути таким же як поточний")]
    SameEmail,

    #[error("Current password is incorrect | Поточний пароль невірний")]
    IncorrectPassword,

    #[error("Product not found | Товар не знайдено")]
    ProductNotFound,

    #[error("Purchased product not found | Придбаний товар не знайдено")]
    PurchaseNotFound,

    #[error("Failed to send email. Please try again later | Не вдалося відправити email. Спробуйте ще раз пізніше.")]
    MailDeliveryFailed { reason: String },
}

impl AccountError {
    /// Machine-readable code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            AccountError::UserNotFound => error_codes::USER_NOT_FOUND,
            AccountError::EmailExists => error_codes::EMAIL_EXISTS,
            AccountError::PendingEmailChange => error_codes::PENDING_EMAIL_CHANGE,
            AccountError::InvalidVerificationCode => error_codes::INVALID_VERIFICATION_CODE,
            AccountError::UserExists => error_codes::USER_EXISTS,
            AccountError::SameEmail => error_codes::SAME_EMAIL,
            AccountError::IncorrectPassword => error_codes::INCORRECT_PASSWORD,
            AccountError::ProductNotFound => error_codes::PRODUCT_NOT_FOUND,
            AccountError::PurchaseNotFound => error_codes::PURCHASE_NOT_FOUND,
            AccountError::MailDeliveryFailed { .. } => error_codes::EMAIL_SEND_FAILED,
        }
    }
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field} | Обов'язкове поле: {field}")]
    RequiredField { field: String },

    #[error("Invalid email format | Невірний формат email")]
    InvalidEmail,

    #[error("New password must be at least {min} characters long | Новий пароль має містити щонайменше {min} символів")]
    PasswordTooShort { min: usize },

    #[error("Only image files are allowed | Дозволені лише зображення")]
    InvalidImage,

    #[error("Image is larger than {max_bytes} bytes | Зображення більше за {max_bytes} байт")]
    ImageTooLarge { max_bytes: usize },
}

impl ValidationError {
    /// Machine-readable code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::RequiredField { .. } => error_codes::VALIDATION_ERROR,
            ValidationError::InvalidEmail => error_codes::INVALID_EMAIL,
            ValidationError::PasswordTooShort { .. } => error_codes::PASSWORD_TOO_SHORT,
            ValidationError::InvalidImage => error_codes::INVALID_IMAGE,
            ValidationError::ImageTooLarge { .. } => error_codes::IMAGE_TOO_LARGE,
        }
    }

    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::RequiredField {
            field: field.into(),
        }
    }
}

/// Pick one half of a bilingual `English | Українська` message.
/// Messages without a separator are returned unchanged.
pub fn localize(message: &str, lang: Language) -> String {
    match message.split_once(" | ") {
        Some((english, ukrainian)) => lang.pick(english, ukrainian).to_string(),
        None => message.to_string(),
    }
}

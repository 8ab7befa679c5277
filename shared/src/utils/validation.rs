//! Input validation helpers shared by the services and the request DTOs

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum accepted length of a new password, in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Length of a verification code
pub const VERIFICATION_CODE_LENGTH: usize = 6;

/// Something, then `@`, then something containing a dot. No whitespace.
pub static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Check an email address against [`EMAIL_REGEX`]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// True for empty or whitespace-only input
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Password length is counted in characters, not bytes
pub fn is_password_long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// Exactly six ASCII digits
pub fn is_verification_code_format(code: &str) -> bool {
    code.len() == VERIFICATION_CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// Mask an email for logs: `jo***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        None => String::from("***"),
    }
}

//! Types for verification service results

use crate::errors::AccountError;

/// Result of verifying a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCodeResult {
    /// Whether the code matched an active row (which is now consumed)
    pub is_valid: bool,
    /// Bilingual reason when the code was rejected
    pub error_message: Option<String>,
}

impl VerifyCodeResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    /// Wrong and expired codes share one message
    pub fn invalid() -> Self {
        Self {
            is_valid: false,
            error_message: Some(AccountError::InvalidVerificationCode.to_string()),
        }
    }
}

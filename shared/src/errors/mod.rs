//! Shared error response structure and machine-readable codes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by every endpoint:
/// `{ "success": false, "error": ..., "code": ..., "details"?: ..., "timestamp": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`
    pub success: bool,

    /// Human-readable error message (localized)
    pub error: String,

    /// Error code for client identification
    pub code: String,

    /// Raw downstream message, only present when detail exposure is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: code.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach raw details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Error codes used across the application
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_JSON: &str = "INVALID_JSON";
    pub const INVALID_UPLOAD: &str = "INVALID_UPLOAD";
    pub const INVALID_EMAIL: &str = "INVALID_EMAIL";
    pub const PASSWORD_TOO_SHORT: &str = "PASSWORD_TOO_SHORT";
    pub const INVALID_IMAGE: &str = "INVALID_IMAGE";
    pub const IMAGE_TOO_LARGE: &str = "IMAGE_TOO_LARGE";
    pub const EMAIL_EXISTS: &str = "EMAIL_EXISTS";
    pub const PENDING_EMAIL_CHANGE: &str = "PENDING_EMAIL_CHANGE";
    pub const INVALID_VERIFICATION_CODE: &str = "INVALID_VERIFICATION_CODE";
    pub const USER_EXISTS: &str = "USER_EXISTS";
    pub const SAME_EMAIL: &str = "SAME_EMAIL";
    pub const INCORRECT_PASSWORD: &str = "INCORRECT_PASSWORD";
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    pub const PRODUCT_NOT_FOUND: &str = "PRODUCT_NOT_FOUND";
    pub const PURCHASE_NOT_FOUND: &str = "PURCHASE_NOT_FOUND";
    pub const EMAIL_SEND_FAILED: &str = "EMAIL_SEND_FAILED";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_skipped_when_absent() {
        let body = serde_json::to_value(ErrorResponse::new(error_codes::USER_NOT_FOUND, "nope")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "USER_NOT_FOUND");
        assert!(body.get("details").is_none());
    }
}

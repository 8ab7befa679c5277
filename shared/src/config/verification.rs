//! Verification code configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Lifetime of issued verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    pub code_ttl_minutes: i64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self { code_ttl_minutes: 15 }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            code_ttl_minutes: env_or(
                "VERIFICATION_CODE_TTL_MINUTES",
                Self::default().code_ttl_minutes,
            ),
        }
    }
}

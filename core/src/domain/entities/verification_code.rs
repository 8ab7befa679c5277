//! Verification code entity for email ownership checks.

use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (15 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 15;

/// The flow a code was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPurpose {
    /// Confirming the address of a new account
    Registration,
    /// Confirming a new address for an existing account
    EmailChange,
}

impl VerificationPurpose {
    /// Value stored in the `verification_type` column
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationPurpose::Registration => "registration",
            VerificationPurpose::EmailChange => "email_change",
        }
    }
}

impl std::fmt::Display for VerificationPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VerificationPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(VerificationPurpose::Registration),
            "email_change" => Ok(VerificationPurpose::EmailChange),
            other => Err(format!("Unknown verification type: {}", other)),
        }
    }
}

/// Verification code entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Store-assigned identifier (0 until persisted)
    pub id: i64,

    /// Address the code was sent to
    pub email: String,

    /// The 6-digit verification code
    pub code: String,

    /// Flow the code belongs to
    pub purpose: VerificationPurpose,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,

    /// Consumed, or superseded by a newer code
    pub is_used: bool,
}

impl VerificationCode {
    /// Creates a new code with the default 15 minute lifetime
    pub fn new(email: String, purpose: VerificationPurpose) -> Self {
        Self::new_with_expiration(email, purpose, DEFAULT_EXPIRATION_MINUTES)
    }

    /// Creates a new code with a custom lifetime
    pub fn new_with_expiration(
        email: String,
        purpose: VerificationPurpose,
        expiration_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            email,
            code: Self::generate_code(),
            purpose,
            created_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            is_used: false,
        }
    }

    /// Generates a random 6-digit code from the OS CSPRNG.
    /// The range starts at 100000 so the code never has a leading zero.
    pub fn generate_code() -> String {
        OsRng.gen_range(100_000..1_000_000u32).to_string()
    }

    /// Checks whether the code has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Unused and not expired
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && !self.is_expired_at(now)
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// Marks the code as used
    pub fn mark_as_used(&mut self) {
        self.is_used = true;
    }
}

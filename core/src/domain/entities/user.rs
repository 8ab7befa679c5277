//! User entity representing an account of the shop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User entity as stored in the `users` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier
    pub id: i64,

    /// Unique email address
    pub email: String,

    /// bcrypt hash; absent for accounts created through federated login
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    /// Display name
    pub name: String,

    /// Relative path of the uploaded profile image
    pub avatar_url: Option<String>,

    /// Federated login provider (e.g. "google"), if any
    pub auth_provider: Option<String>,

    pub is_admin: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new password-less user
    pub fn new(id: i64, email: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: email.into(),
            password_hash: None,
            name: name.into(),
            avatar_url: None,
            auth_provider: None,
            is_admin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the stored password hash
    pub fn with_password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    /// Whether a password must be presented to change it
    pub fn has_password(&self) -> bool {
        self.password_hash
            .as_deref()
            .map(|hash| !hash.is_empty())
            .unwrap_or(false)
    }

    /// Updates the timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_federated_user_has_no_password() {
        let mut user = User::new(1, "a@x.com", "Anna");
        assert!(!user.has_password());

        user.password_hash = Some(String::new());
        assert!(!user.has_password());

        let user = user.with_password_hash("$2b$12$hash");
        assert!(user.has_password());
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let user = User::new(1, "a@x.com", "Anna").with_password_hash("secret");
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}

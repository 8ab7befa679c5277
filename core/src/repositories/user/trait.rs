//! User repository trait defining the interface for user data persistence.
//!
//! Operations that touch more than one row (email change, account deletion)
//! are single repository calls so that implementations can run them inside
//! one storage transaction.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Outcome of [`UserRepository::commit_email_change`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailChangeCommit {
    /// Email updated and the consumed code removed
    Committed(User),
    /// Another account owns the address; nothing was changed
    EmailTaken,
    /// The user row is gone; nothing was changed
    UserNotFound,
}

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this id
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Find a user by exact email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check whether any account other than `excluding_user_id` owns `email`
    async fn email_taken(
        &self,
        email: &str,
        excluding_user_id: Option<i64>,
    ) -> Result<bool, DomainError>;

    /// Set the display name
    ///
    /// # Returns
    /// * `Ok(Some(User))` - The updated user
    /// * `Ok(None)` - No user with this id
    async fn update_name(&self, id: i64, name: &str) -> Result<Option<User>, DomainError>;

    /// Replace the stored password hash and bump `updated_at`
    ///
    /// # Returns
    /// * `Ok(false)` - No user with this id
    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, DomainError>;

    /// Set or clear the relative avatar path
    ///
    /// # Returns
    /// * `Ok(false)` - No user with this id
    async fn update_avatar(&self, id: i64, avatar_url: Option<&str>) -> Result<bool, DomainError>;

    /// Verified email change, atomically:
    /// 1. re-check that no other account owns `new_email`
    /// 2. update the user's email
    /// 3. delete the consumed `(new_email, code)` verification row
    async fn commit_email_change(
        &self,
        user_id: i64,
        new_email: &str,
        code: &str,
    ) -> Result<EmailChangeCommit, DomainError>;

    /// Delete the user together with every verification code addressed to
    /// their current email. Purchases go with the user row.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - The user as it was before deletion
    /// * `Ok(None)` - No user with this id
    async fn delete_with_codes(&self, id: i64) -> Result<Option<User>, DomainError>;
}

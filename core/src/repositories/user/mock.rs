//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::verification_code::MockVerificationCodeRepository;

use super::trait_::{EmailChangeCommit, UserRepository};

/// Mock user repository for testing
///
/// When linked to a [`MockVerificationCodeRepository`] the email-change
/// commit and account deletion also remove code rows, mirroring the
/// transactional MySQL implementation.
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    codes: Option<Arc<MockVerificationCodeRepository>>,
    should_fail: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            codes: None,
            should_fail: AtomicBool::new(false),
        }
    }

    /// Share a code store with this repository
    pub fn with_codes(codes: Arc<MockVerificationCodeRepository>) -> Self {
        Self {
            codes: Some(codes),
            ..Self::new()
        }
    }

    /// Seed a user
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Snapshot of a stored user
    pub async fn get(&self, id: i64) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    /// Make every following call fail with an internal error
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Mock user repository failure"));
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn email_taken(
        &self,
        email: &str,
        excluding_user_id: Option<i64>,
    ) -> Result<bool, DomainError> {
        self.check_available()?;
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.email == email && Some(u.id) != excluding_user_id))
    }

    async fn update_name(&self, id: i64, name: &str) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            user.name = name.to_string();
            user.touch();
            user.clone()
        }))
    }

    async fn update_password(&self, id: i64, password_hash: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;
        Ok(users
            .get_mut(&id)
            .map(|user| {
                user.password_hash = Some(password_hash.to_string());
                user.touch();
            })
            .is_some())
    }

    async fn update_avatar(&self, id: i64, avatar_url: Option<&str>) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;
        Ok(users
            .get_mut(&id)
            .map(|user| {
                user.avatar_url = avatar_url.map(str::to_string);
                user.touch();
            })
            .is_some())
    }

    async fn commit_email_change(
        &self,
        user_id: i64,
        new_email: &str,
        code: &str,
    ) -> Result<EmailChangeCommit, DomainError> {
        self.check_available()?;
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.email == new_email && u.id != user_id)
        {
            return Ok(EmailChangeCommit::EmailTaken);
        }

        let Some(user) = users.get_mut(&user_id) else {
            return Ok(EmailChangeCommit::UserNotFound);
        };
        user.email = new_email.to_string();
        user.updated_at = Utc::now();
        let updated = user.clone();

        if let Some(codes) = &self.codes {
            codes.remove(new_email, code).await;
        }

        Ok(EmailChangeCommit::Committed(updated))
    }

    async fn delete_with_codes(&self, id: i64) -> Result<Option<User>, DomainError> {
        self.check_available()?;
        let removed = self.users.write().await.remove(&id);

        if let (Some(user), Some(codes)) = (&removed, &self.codes) {
            codes.remove_all_for(&user.email).await;
        }

        Ok(removed)
    }
}

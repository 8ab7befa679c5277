//! Mock implementation of VerificationCodeRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::verification_code::{VerificationCode, VerificationPurpose};
use crate::errors::DomainError;

use super::trait_::VerificationCodeRepository;

/// In-memory code store
pub struct MockVerificationCodeRepository {
    codes: Arc<RwLock<Vec<VerificationCode>>>,
    next_id: AtomicI64,
    should_fail: AtomicBool,
}

impl MockVerificationCodeRepository {
    pub fn new() -> Self {
        Self {
            codes: Arc::new(RwLock::new(Vec::new())),
            next_id: AtomicI64::new(1),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Store a code as-is, without invalidating others.
    /// Lets tests plant fixed or already expired codes.
    pub async fn seed(&self, mut code: VerificationCode) -> VerificationCode {
        code.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.codes.write().await.push(code.clone());
        code
    }

    /// All rows for an email, oldest first
    pub async fn codes_for(&self, email: &str) -> Vec<VerificationCode> {
        self.codes
            .read()
            .await
            .iter()
            .filter(|c| c.email == email)
            .cloned()
            .collect()
    }

    /// Active rows for an email at the current time
    pub async fn active_codes_for(&self, email: &str) -> Vec<VerificationCode> {
        let now = Utc::now();
        self.codes_for(email)
            .await
            .into_iter()
            .filter(|c| c.is_active_at(now))
            .collect()
    }

    /// Delete `(email, code)` rows
    pub async fn remove(&self, email: &str, code: &str) -> u64 {
        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|c| !(c.email == email && c.code == code));
        (before - codes.len()) as u64
    }

    /// Delete every row for an email
    pub async fn remove_all_for(&self, email: &str) -> u64 {
        let mut codes = self.codes.write().await;
        let before = codes.len();
        codes.retain(|c| c.email != email);
        (before - codes.len()) as u64
    }

    /// Make every following call fail with an internal error
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::internal("Mock code store failure"));
        }
        Ok(())
    }
}

impl Default for MockVerificationCodeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationCodeRepository for MockVerificationCodeRepository {
    async fn replace_active(&self, mut code: VerificationCode) -> Result<VerificationCode, DomainError> {
        self.check_available()?;
        let mut codes = self.codes.write().await;

        for existing in codes.iter_mut().filter(|c| c.email == code.email && !c.is_used) {
            existing.mark_as_used();
        }

        code.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        codes.push(code.clone());
        Ok(code)
    }

    async fn consume(
        &self,
        email: &str,
        code: &str,
        purpose: Option<VerificationPurpose>,
        now: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        self.check_available()?;
        let mut codes = self.codes.write().await;

        match codes.iter_mut().find(|c| {
            c.email == email
                && c.code == code
                && purpose.map_or(true, |p| c.purpose == p)
                && c.is_active_at(now)
        })
        {
            Some(found) => {
                found.mark_as_used();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn has_active(&self, email: &str, now: DateTime<Utc>) -> Result<bool, DomainError> {
        self.check_available()?;
        let codes = self.codes.read().await;
        Ok(codes.iter().any(|c| c.email == email && c.is_active_at(now)))
    }

    async fn delete(&self, email: &str, code: &str) -> Result<u64, DomainError> {
        self.check_available()?;
        Ok(self.remove(email, code).await)
    }
}

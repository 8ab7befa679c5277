//! Account service implementation

use std::sync::Arc;

use mz_shared::validation::{is_blank, is_password_long_enough, MIN_PASSWORD_LENGTH};

use crate::domain::entities::user::User;
use crate::errors::{AccountError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;

use super::config::AccountServiceConfig;
use super::storage::AvatarStorage;
use super::types::AvatarUpload;

/// Profile, credential and account lifecycle operations
pub struct AccountService<U: UserRepository, F: AvatarStorage> {
    user_repository: Arc<U>,
    avatar_storage: Arc<F>,
    config: AccountServiceConfig,
}

impl<U: UserRepository, F: AvatarStorage> AccountService<U, F> {
    pub fn new(user_repository: Arc<U>, avatar_storage: Arc<F>, config: AccountServiceConfig) -> Self {
        Self {
            user_repository,
            avatar_storage,
            config,
        }
    }

    async fn require_user(&self, user_id: i64) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AccountError::UserNotFound.into())
    }

    /// Current profile of the user
    pub async fn get_profile(&self, user_id: i64) -> DomainResult<User> {
        self.require_user(user_id).await
    }

    /// Rename the user; the name is stored trimmed
    pub async fn update_name(&self, user_id: i64, name: &str) -> DomainResult<User> {
        if is_blank(name) {
            return Err(ValidationError::required("name").into());
        }

        let user = self
            .user_repository
            .update_name(user_id, name.trim())
            .await?
            .ok_or(AccountError::UserNotFound)?;

        tracing::info!(user_id, event = "profile_name_updated", "User name updated");
        Ok(user)
    }

    /// Change the password
    ///
    /// Accounts without a stored hash (federated login) skip the old-password
    /// check, which lets them set a first password.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - New hash persisted
    /// * `Err(ValidationError)` - Missing fields or new password too short
    /// * `Err(AccountError::UserNotFound)` - Unknown user
    /// * `Err(AccountError::IncorrectPassword)` - Old password does not match
    pub async fn change_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        if old_password.is_empty() {
            return Err(ValidationError::required("oldPassword").into());
        }
        if new_password.is_empty() {
            return Err(ValidationError::required("newPassword").into());
        }
        if !is_password_long_enough(new_password) {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            }
            .into());
        }

        let user = self.require_user(user_id).await?;

        if let Some(stored_hash) = user.password_hash.clone().filter(|h| !h.is_empty()) {
            let candidate = old_password.to_string();
            let matches = tokio::task::spawn_blocking(move || bcrypt::verify(candidate, &stored_hash))
                .await
                .map_err(|e| DomainError::internal(format!("Password check task failed: {}", e)))?
                .map_err(|e| DomainError::internal(format!("Failed to verify password: {}", e)))?;

            if !matches {
                tracing::warn!(user_id, event = "password_change_rejected", "Current password mismatch");
                return Err(AccountError::IncorrectPassword.into());
            }
        }

        let new_hash = self.hash_password(new_password).await?;

        if !self.user_repository.update_password(user_id, &new_hash).await? {
            return Err(AccountError::UserNotFound.into());
        }

        tracing::info!(
            user_id,
            first_password = !user.has_password(),
            event = "password_changed",
            "Password changed"
        );
        Ok(())
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    /// Store a new avatar and record its relative path
    ///
    /// The previous file is removed best-effort once the new path is saved.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Relative public path of the stored image
    pub async fn upload_avatar(&self, user_id: i64, upload: AvatarUpload) -> DomainResult<String> {
        if upload.bytes.is_empty() {
            return Err(ValidationError::required("image").into());
        }
        let Some(extension) = upload.extension() else {
            return Err(ValidationError::InvalidImage.into());
        };
        if upload.bytes.len() > self.config.max_avatar_bytes {
            return Err(ValidationError::ImageTooLarge {
                max_bytes: self.config.max_avatar_bytes,
            }
            .into());
        }

        let user = self.require_user(user_id).await?;

        let path = self
            .avatar_storage
            .store(extension, &upload.bytes)
            .await
            .map_err(|e| {
                tracing::error!(user_id, error = %e, event = "avatar_store_failed", "Failed to store avatar");
                DomainError::internal(format!("Failed to store avatar: {}", e))
            })?;

        if !self.user_repository.update_avatar(user_id, Some(&path)).await? {
            self.remove_file(user_id, &path).await;
            return Err(AccountError::UserNotFound.into());
        }

        if let Some(previous) = user.avatar_url.as_deref().filter(|p| *p != path) {
            self.remove_file(user_id, previous).await;
        }

        tracing::info!(
            user_id,
            path = %path,
            size = upload.bytes.len(),
            event = "avatar_uploaded",
            "Profile image uploaded"
        );
        Ok(path)
    }

    /// Delete the stored avatar file and clear the path. Succeeds when no
    /// avatar is set or the user is gone.
    pub async fn remove_avatar(&self, user_id: i64) -> DomainResult<()> {
        if let Some(path) = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .and_then(|user| user.avatar_url)
        {
            self.remove_file(user_id, &path).await;
        }

        self.user_repository.update_avatar(user_id, None).await?;
        tracing::info!(user_id, event = "avatar_removed", "Profile image removed");
        Ok(())
    }

    /// Hard-delete the account
    ///
    /// Purchases cascade with the user row and codes addressed to the current
    /// email go in the same transaction. The avatar file is removed afterwards.
    /// Deleting an already missing account succeeds.
    pub async fn delete_account(&self, user_id: i64) -> DomainResult<()> {
        match self.user_repository.delete_with_codes(user_id).await? {
            Some(user) => {
                if let Some(path) = user.avatar_url.as_deref() {
                    self.remove_file(user_id, path).await;
                }
                tracing::info!(user_id, event = "account_deleted", "Account deleted");
            }
            None => {
                tracing::info!(user_id, event = "account_already_deleted", "Account was already gone");
            }
        }
        Ok(())
    }

    /// Acknowledge a request to resend purchased material. Delivery itself
    /// is handled outside this service.
    pub async fn resend_material(
        &self,
        user_id: i64,
        material_name: Option<&str>,
        purchase_date: Option<&str>,
    ) -> DomainResult<()> {
        tracing::info!(
            user_id,
            material = material_name.unwrap_or(""),
            purchase_date = purchase_date.unwrap_or(""),
            event = "material_resend_requested",
            "Material resend requested"
        );
        Ok(())
    }

    async fn remove_file(&self, user_id: i64, path: &str) {
        if let Err(e) = self.avatar_storage.remove(path).await {
            tracing::warn!(
                user_id,
                path = %path,
                error = %e,
                event = "avatar_cleanup_failed",
                "Failed to delete avatar file"
            );
        }
    }
}

//! File medium for profile images

use async_trait::async_trait;

/// Storage for uploaded avatars
#[async_trait]
pub trait AvatarStorage: Send + Sync {
    /// Persist an image under a fresh unique name
    ///
    /// # Returns
    /// * `Ok(String)` - Relative public path, e.g. `/uploads/profiles/profile-1700000000000-42.png`
    /// * `Err(String)` - Storage failure description
    async fn store(&self, extension: &str, bytes: &[u8]) -> Result<String, String>;

    /// Delete a previously stored image by its relative public path.
    /// A missing file is not an error.
    async fn remove(&self, public_path: &str) -> Result<(), String>;
}

//! Bought-product ledger.

use async_trait::async_trait;

use crate::domain::entities::purchase::Purchase;
use crate::errors::DomainError;

#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// Product ids bought by the user, newest purchase first
    async fn list_product_ids(&self, user_id: i64) -> Result<Vec<i64>, DomainError>;

    async fn product_exists(&self, product_id: i64) -> Result<bool, DomainError>;

    /// Insert a purchase row; repeated purchases are allowed
    async fn record(&self, user_id: i64, product_id: i64) -> Result<Purchase, DomainError>;

    /// Delete the user's rows for a product, returning how many were removed
    async fn remove(&self, user_id: i64, product_id: i64) -> Result<u64, DomainError>;
}

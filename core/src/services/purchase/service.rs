use std::sync::Arc;

use crate::domain::entities::purchase::Purchase;
use crate::errors::{AccountError, DomainResult};
use crate::repositories::PurchaseRepository;

/// Records and lists purchases of the authenticated user
pub struct PurchaseService<P: PurchaseRepository> {
    purchase_repository: Arc<P>,
}

impl<P: PurchaseRepository> PurchaseService<P> {
    pub fn new(purchase_repository: Arc<P>) -> Self {
        Self { purchase_repository }
    }

    /// Product ids, newest purchase first
    pub async fn list_product_ids(&self, user_id: i64) -> DomainResult<Vec<i64>> {
        self.purchase_repository.list_product_ids(user_id).await
    }

    /// Record a purchase of an existing product. Buying the same product
    /// again adds another row.
    pub async fn record(&self, user_id: i64, product_id: i64) -> DomainResult<Purchase> {
        if !self.purchase_repository.product_exists(product_id).await? {
            return Err(AccountError::ProductNotFound.into());
        }

        let purchase = self.purchase_repository.record(user_id, product_id).await?;
        tracing::info!(
            user_id,
            product_id,
            purchase_id = purchase.id,
            event = "purchase_recorded",
            "Purchase recorded"
        );
        Ok(purchase)
    }

    /// Remove the user's records of a product
    pub async fn remove(&self, user_id: i64, product_id: i64) -> DomainResult<()> {
        let removed = self.purchase_repository.remove(user_id, product_id).await?;
        if removed == 0 {
            return Err(AccountError::PurchaseNotFound.into());
        }

        tracing::info!(user_id, product_id, removed, event = "purchase_removed", "Purchase removed");
        Ok(())
    }
}

//! Mock implementation of PurchaseRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::purchase::Purchase;
use crate::errors::DomainError;

use super::trait_::PurchaseRepository;

/// In-memory purchase ledger with a fixed product catalogue
pub struct MockPurchaseRepository {
    products: Arc<RwLock<HashSet<i64>>>,
    purchases: Arc<RwLock<Vec<Purchase>>>,
    next_id: AtomicI64,
}

impl MockPurchaseRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashSet::new())),
            purchases: Arc::new(RwLock::new(Vec::new())),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create a repository knowing the given product ids
    pub async fn with_products(ids: impl IntoIterator<Item = i64>) -> Self {
        let repository = Self::new();
        repository.products.write().await.extend(ids);
        repository
    }

    /// All purchase rows of a user
    pub async fn purchases_of(&self, user_id: i64) -> Vec<Purchase> {
        self.purchases
            .read()
            .await
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect()
    }
}

impl Default for MockPurchaseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PurchaseRepository for MockPurchaseRepository {
    async fn list_product_ids(&self, user_id: i64) -> Result<Vec<i64>, DomainError> {
        let mut rows = self.purchases_of(user_id).await;
        rows.sort_by(|a, b| b.bought_at.cmp(&a.bought_at).then(b.id.cmp(&a.id)));
        Ok(rows.into_iter().map(|p| p.product_id).collect())
    }

    async fn product_exists(&self, product_id: i64) -> Result<bool, DomainError> {
        Ok(self.products.read().await.contains(&product_id))
    }

    async fn record(&self, user_id: i64, product_id: i64) -> Result<Purchase, DomainError> {
        let mut purchases = self.purchases.write().await;
        let purchase = Purchase {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id,
            product_id,
            bought_at: Utc::now(),
        };
        purchases.push(purchase.clone());
        Ok(purchase)
    }

    async fn remove(&self, user_id: i64, product_id: i64) -> Result<u64, DomainError> {
        let mut purchases = self.purchases.write().await;
        let before = purchases.len();
        purchases.retain(|p| !(p.user_id == user_id && p.product_id == product_id));
        Ok((before - purchases.len()) as u64)
    }
}

//! MySQL implementation of the PurchaseRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{MySqlPool, Row};

use mz_core::domain::entities::purchase::Purchase;
use mz_core::errors::DomainError;
use mz_core::repositories::PurchaseRepository;

use super::{column_error, db_error};

pub struct MySqlPurchaseRepository {
    pool: MySqlPool,
}

impl MySqlPurchaseRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseRepository for MySqlPurchaseRepository {
    async fn list_product_ids(&self, user_id: i64) -> Result<Vec<i64>, DomainError> {
        let rows = sqlx::query(
            "SELECT product_id FROM bought_user_products WHERE user_id = ? ORDER BY bought_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list bought products"))?;

        rows.iter()
            .map(|row| row.try_get("product_id").map_err(column_error("product_id")))
            .collect()
    }

    async fn product_exists(&self, product_id: i64) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS found FROM products WHERE id = ?")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("check product"))?;

        let found: i64 = row.try_get("found").map_err(column_error("found"))?;
        Ok(found > 0)
    }

    async fn record(&self, user_id: i64, product_id: i64) -> Result<Purchase, DomainError> {
        let bought_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO bought_user_products (user_id, product_id, bought_at) VALUES (?, ?, ?)",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(bought_at)
        .execute(&self.pool)
        .await
        .map_err(db_error("record purchase"))?;

        Ok(Purchase {
            id: result.last_insert_id() as i64,
            user_id,
            product_id,
            bought_at,
        })
    }

    async fn remove(&self, user_id: i64, product_id: i64) -> Result<u64, DomainError> {
        let result =
            sqlx::query("DELETE FROM bought_user_products WHERE user_id = ? AND product_id = ?")
                .bind(user_id)
                .bind(product_id)
                .execute(&self.pool)
                .await
                .map_err(db_error("remove purchase"))?;

        Ok(result.rows_affected())
    }
}

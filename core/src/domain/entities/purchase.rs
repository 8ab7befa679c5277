//! Bought-product record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row of `bought_user_products`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub bought_at: DateTime<Utc>,
}

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddPurchaseRequest {
    #[serde(default)]
    #[validate(range(min = 1))]
    pub product_id: Option<i64>,
}

//! Request and response bodies. Field names follow the web client's
//! camelCase contract; a few profile fields keep their historical snake_case.

pub mod bought_products;
pub mod users;

pub use bought_products::AddPurchaseRequest;
pub use users::*;

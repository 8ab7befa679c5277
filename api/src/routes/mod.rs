//! HTTP route handlers, grouped by mount point

pub mod bought_products;
pub mod users;

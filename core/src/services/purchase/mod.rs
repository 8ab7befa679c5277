//! Bought-product ledger operations

mod service;

pub use service::PurchaseService;

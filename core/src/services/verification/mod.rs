//! Verification code service for email ownership checks
//!
//! - Code issuance with single-active-code invalidation
//! - Single-use consumption of unexpired codes
//! - Pending-code detection

mod config;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use types::VerifyCodeResult;

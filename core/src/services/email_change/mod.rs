//! Email change flow
//!
//! `NoPendingChange -> CodeIssued -> Verified | Expired/Invalid`
//!
//! A code is issued to the new address on initiation; presenting it back
//! commits the change. The code store is the only state between the steps.

mod config;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::EmailChangeConfig;
pub use service::EmailChangeService;
pub use types::{EmailChangeInitiated, EmailChanged};

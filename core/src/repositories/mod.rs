//! Repository interfaces and in-memory implementations.
//!
//! The MySQL implementations live in the infrastructure crate; the mocks
//! here back the service unit tests and the HTTP integration tests.

pub mod purchase;
pub mod user;
pub mod verification_code;

pub use purchase::{MockPurchaseRepository, PurchaseRepository};
pub use user::{EmailChangeCommit, MockUserRepository, UserRepository};
pub use verification_code::{MockVerificationCodeRepository, VerificationCodeRepository};

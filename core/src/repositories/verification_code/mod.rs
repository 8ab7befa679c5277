pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
mod mock;

pub use mock::MockVerificationCodeRepository;
pub use r#trait::VerificationCodeRepository;

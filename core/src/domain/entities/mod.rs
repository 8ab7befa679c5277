//! Domain entities representing core business objects.

pub mod purchase;
pub mod user;
pub mod verification_code;

pub use purchase::Purchase;
pub use user::User;
pub use verification_code::{
    VerificationCode, VerificationPurpose, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES,
};

//! Results of the email change steps

use serde::Serialize;

/// A code was sent to the new address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailChangeInitiated {
    /// Address the code was sent to
    pub email: String,
    /// Address still on the account
    pub current_email: String,
}

/// The account now uses the new address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailChanged {
    pub id: i64,
    pub email: String,
}

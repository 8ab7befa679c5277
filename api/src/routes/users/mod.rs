//! Handlers mounted under `/api/users`

pub mod account;
pub mod avatar;
pub mod email_change;
pub mod password;
pub mod profile;

use mz_core::{DomainError, DomainResult, ValidationError};

use crate::handlers::messages;
use crate::middleware::AuthContext;

/// A body that names a user id may only name the caller
fn ensure_own_account(field: &str, body_id: Option<i64>, auth: AuthContext) -> DomainResult<()> {
    match body_id {
        None => Err(ValidationError::required(field).into()),
        Some(id) if id == auth.user_id => Ok(()),
        Some(id) => {
            tracing::warn!(
                user_id = auth.user_id,
                requested_id = id,
                event = "foreign_account_access",
                "Body names another user"
            );
            Err(DomainError::Forbidden {
                message: messages::FORBIDDEN_OTHER_USER.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_own_account() {
        let auth = AuthContext { user_id: 7 };

        assert!(ensure_own_account("id", Some(7), auth).is_ok());
        assert!(matches!(
            ensure_own_account("id", Some(8), auth),
            Err(DomainError::Forbidden { .. })
        ));
        assert!(matches!(
            ensure_own_account("userId", None, auth),
            Err(DomainError::ValidationErr(ValidationError::RequiredField { field })) if field == "userId"
        ));
    }
}

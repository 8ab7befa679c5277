use actix_web::{web, HttpRequest, HttpResponse};

use mz_core::repositories::{PurchaseRepository, UserRepository, VerificationCodeRepository};
use mz_core::services::{AvatarStorage, MailTransport};
use mz_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::ChangePasswordRequest;
use crate::handlers::{extract_language, handle_domain_error};
use crate::middleware::AuthContext;

/// Handler for POST /api/users/change-password
///
/// # Request Body
///
/// ```json
/// { "oldPassword": "secret1", "newPassword": "secret2" }
/// ```
///
/// `oldPassword` is not compared for accounts that never had a password.
pub async fn change_password<U, V, P, M, F>(
    req: HttpRequest,
    state: web::Data<AppState<U, V, P, M, F>>,
    auth: AuthContext,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    P: PurchaseRepository + 'static,
    M: MailTransport + 'static,
    F: AvatarStorage + 'static,
{
    let request = request.into_inner();
    let old_password = request.old_password.unwrap_or_default();
    let new_password = request.new_password.unwrap_or_default();

    match state
        .account_service
        .change_password(auth.user_id, &old_password, &new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::ok()),
        Err(e) => handle_domain_error(
            &e,
            extract_language(&req),
            state.settings.expose_error_details,
        ),
    }
}

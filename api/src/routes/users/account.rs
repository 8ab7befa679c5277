use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mz_core::localize;
use mz_core::repositories::{PurchaseRepository, UserRepository, VerificationCodeRepository};
use mz_core::services::{AvatarStorage, MailTransport};
use mz_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::ResendMaterialRequest;
use crate::handlers::{extract_language, handle_domain_error, handle_validation_errors, messages};
use crate::middleware::AuthContext;

/// Handler for DELETE /api/users/account
///
/// Hard delete; purchases and pending codes go with the account.
pub async fn delete_account<U, V, P, M, F>(
    req: HttpRequest,
    state: web::Data<AppState<U, V, P, M, F>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    P: PurchaseRepository + 'static,
    M: MailTransport + 'static,
    F: AvatarStorage + 'static,
{
    match state.account_service.delete_account(auth.user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::ok()),
        Err(e) => handle_domain_error(
            &e,
            extract_language(&req),
            state.settings.expose_error_details,
        ),
    }
}

/// Handler for POST /api/users/resend-material
pub async fn resend_material<U, V, P, M, F>(
    req: HttpRequest,
    state: web::Data<AppState<U, V, P, M, F>>,
    auth: AuthContext,
    request: web::Json<ResendMaterialRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    P: PurchaseRepository + 'static,
    M: MailTransport + 'static,
    F: AvatarStorage + 'static,
{
    let lang = extract_language(&req);
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors, lang);
    }

    match state
        .account_service
        .resend_material(
            auth.user_id,
            request.material_name.as_deref(),
            request.purchase_date.as_deref(),
        )
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::message(localize(messages::MATERIAL_RESEND, lang))),
        Err(e) => handle_domain_error(&e, lang, state.settings.expose_error_details),
    }
}

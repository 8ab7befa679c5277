//! Email change: initiate, verify, resend-code
//!
//! A code is mailed to the new address; the account email only changes once
//! that code comes back through `verify`.

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mz_core::localize;
use mz_core::repositories::{PurchaseRepository, UserRepository, VerificationCodeRepository};
use mz_core::services::{AvatarStorage, MailTransport};

use crate::app::AppState;
use crate::dto::{
    ChangedEmailUser, CodeResentResponse, EmailChangeInitiatedResponse, EmailChangedResponse,
    InitiateEmailChangeRequest, ResendCodeRequest, VerifyEmailChangeRequest,
};
use crate::handlers::{extract_language, handle_domain_error, handle_validation_errors, messages};
use crate::middleware::AuthContext;

use super::ensure_own_account;

/// Handler for POST /api/users/email/change/initiate
///
/// # Request Body
///
/// ```json
/// { "newEmail": "new@example.com", "id": 42 }
/// ```
///
/// # Errors
///
/// * 400 `EMAIL_EXISTS` - Address belongs to another account
/// * 400 `PENDING_EMAIL_CHANGE` - A code for the address is still active
/// * 403 - `id` is not the authenticated user
pub async fn initiate<U, V, P, M, F>(
    req: HttpRequest,
    state: web::Data<AppState<U, V, P, M, F>>,
    auth: AuthContext,
    request: web::Json<InitiateEmailChangeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    P: PurchaseRepository + 'static,
    M: MailTransport + 'static,
    F: AvatarStorage + 'static,
{
    let lang = extract_language(&req);
    let expose = state.settings.expose_error_details;

    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors, lang);
    }
    if let Err(e) = ensure_own_account("id", request.id, auth) {
        return handle_domain_error(&e, lang, expose);
    }

    let new_email = request.new_email.as_deref().unwrap_or_default().trim();
    match state.email_change_service.initiate(auth.user_id, new_email).await {
        Ok(initiated) => HttpResponse::Ok().json(EmailChangeInitiatedResponse {
            success: true,
            message: localize(messages::EMAIL_CHANGE_CODE_SENT, lang),
            email: initiated.email,
            current_email: initiated.current_email,
        }),
        Err(e) => handle_domain_error(&e, lang, expose),
    }
}

/// Handler for POST /api/users/email/change/verify
///
/// # Request Body
///
/// ```json
/// { "newEmail": "new@example.com", "verificationCode": "123456", "userId": 42 }
/// ```
pub async fn verify<U, V, P, M, F>(
    req: HttpRequest,
    state: web::Data<AppState<U, V, P, M, F>>,
    auth: AuthContext,
    request: web::Json<VerifyEmailChangeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    P: PurchaseRepository + 'static,
    M: MailTransport + 'static,
    F: AvatarStorage + 'static,
{
    let lang = extract_language(&req);
    let expose = state.settings.expose_error_details;

    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors, lang);
    }
    if let Err(e) = ensure_own_account("userId", request.user_id, auth) {
        return handle_domain_error(&e, lang, expose);
    }

    let new_email = request.new_email.as_deref().unwrap_or_default().trim();
    let code = request.verification_code.as_deref().unwrap_or_default().trim();

    match state
        .email_change_service
        .verify(auth.user_id, new_email, code)
        .await
    {
        Ok(changed) => HttpResponse::Ok().json(EmailChangedResponse {
            success: true,
            message: localize(messages::EMAIL_CHANGED, lang),
            user: ChangedEmailUser {
                id: changed.id,
                email: changed.email,
            },
        }),
        Err(e) => handle_domain_error(&e, lang, expose),
    }
}

/// Handler for POST /api/users/email/change/resend-code
///
/// Supersedes any earlier code for the address, pending or not.
pub async fn resend_code<U, V, P, M, F>(
    req: HttpRequest,
    state: web::Data<AppState<U, V, P, M, F>>,
    auth: AuthContext,
    request: web::Json<ResendCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    P: PurchaseRepository + 'static,
    M: MailTransport + 'static,
    F: AvatarStorage + 'static,
{
    let lang = extract_language(&req);
    let expose = state.settings.expose_error_details;

    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors, lang);
    }

    let email = request.email.as_deref().unwrap_or_default().trim();
    match state.email_change_service.resend(auth.user_id, email).await {
        Ok(()) => HttpResponse::Ok().json(CodeResentResponse {
            success: true,
            message: localize(messages::EMAIL_CHANGE_CODE_RESENT, lang),
            email: email.to_string(),
        }),
        Err(e) => handle_domain_error(&e, lang, expose),
    }
}

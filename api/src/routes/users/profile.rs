use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mz_core::repositories::{PurchaseRepository, UserRepository, VerificationCodeRepository};
use mz_core::services::{AvatarStorage, MailTransport};

use crate::app::AppState;
use crate::dto::{NamedUser, ProfileResponse, UpdateNameRequest, UpdateNameResponse, UserProfile};
use crate::handlers::{
    construct_full_url, extract_language, handle_domain_error, handle_validation_errors,
};
use crate::middleware::AuthContext;

/// Handler for GET /api/users/profile
///
/// The stored avatar path is expanded to an absolute URL.
pub async fn get_profile<U, V, P, M, F>(
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
    match state.account_service.get_profile(auth.user_id).await {
        Ok(user) => {
            let avatar_url = construct_full_url(
                &req,
                state.settings.public_base_url.as_deref(),
                user.avatar_url.as_deref(),
            );
            HttpResponse::Ok().json(ProfileResponse {
                user: UserProfile {
                    id: user.id,
                    name: user.name,
                    email: user.email,
                    avatar_url,
                    auth_provider: user.auth_provider,
                    created_at: user.created_at,
                    is_admin: user.is_admin,
                },
            })
        }
        Err(e) => handle_domain_error(
            &e,
            extract_language(&req),
            state.settings.expose_error_details,
        ),
    }
}

/// Handler for PUT /api/users/profile/name
pub async fn update_name<U, V, P, M, F>(
    req: HttpRequest,
    state: web::Data<AppState<U, V, P, M, F>>,
    auth: AuthContext,
    request: web::Json<UpdateNameRequest>,
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

    let name = request.name.as_deref().unwrap_or_default();
    match state.account_service.update_name(auth.user_id, name).await {
        Ok(user) => HttpResponse::Ok().json(UpdateNameResponse {
            success: true,
            user: NamedUser {
                id: user.id,
                email: user.email,
                name: user.name,
            },
        }),
        Err(e) => handle_domain_error(&e, lang, state.settings.expose_error_details),
    }
}

//! Handlers mounted under `/api/bought-products`

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use mz_core::repositories::{PurchaseRepository, UserRepository, VerificationCodeRepository};
use mz_core::services::{AvatarStorage, MailTransport};
use mz_core::{DomainError, ValidationError};
use mz_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::AddPurchaseRequest;
use crate::handlers::{extract_language, handle_domain_error, handle_validation_errors};
use crate::middleware::AuthContext;

/// Handler for GET /api/bought-products/ids
///
/// Responds with `{ "success": true, "data": [ids] }`, newest purchase first.
pub async fn list_ids<U, V, P, M, F>(
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
    match state.purchase_service.list_product_ids(auth.user_id).await {
        Ok(ids) => HttpResponse::Ok().json(ApiResponse::success(ids)),
        Err(e) => handle_domain_error(
            &e,
            extract_language(&req),
            state.settings.expose_error_details,
        ),
    }
}

/// Handler for POST /api/bought-products
pub async fn record<U, V, P, M, F>(
    req: HttpRequest,
    state: web::Data<AppState<U, V, P, M, F>>,
    auth: AuthContext,
    request: web::Json<AddPurchaseRequest>,
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
    let Some(product_id) = request.product_id else {
        let error = DomainError::from(ValidationError::required("productId"));
        return handle_domain_error(&error, lang, expose);
    };

    match state.purchase_service.record(auth.user_id, product_id).await {
        Ok(_) => HttpResponse::Created().json(ApiResponse::ok()),
        Err(e) => handle_domain_error(&e, lang, expose),
    }
}

/// Handler for DELETE /api/bought-products/{product_id}
pub async fn remove<U, V, P, M, F>(
    req: HttpRequest,
    state: web::Data<AppState<U, V, P, M, F>>,
    auth: AuthContext,
    product_id: web::Path<i64>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    P: PurchaseRepository + 'static,
    M: MailTransport + 'static,
    F: AvatarStorage + 'static,
{
    match state
        .purchase_service
        .remove(auth.user_id, product_id.into_inner())
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

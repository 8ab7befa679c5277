use actix_multipart::{Multipart, MultipartError};
use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;

use mz_core::repositories::{PurchaseRepository, UserRepository, VerificationCodeRepository};
use mz_core::services::{AvatarStorage, AvatarUpload, MailTransport};
use mz_core::{localize, DomainError, ValidationError};
use mz_shared::{error_codes, ApiResponse, ErrorResponse, Language};

use crate::app::AppState;
use crate::dto::ImageUploadResponse;
use crate::handlers::{construct_full_url, extract_language, handle_domain_error, messages};
use crate::middleware::AuthContext;

const IMAGE_FIELD: &str = "image";

enum ReadError {
    Multipart(MultipartError),
    Domain(DomainError),
}

impl From<MultipartError> for ReadError {
    fn from(err: MultipartError) -> Self {
        ReadError::Multipart(err)
    }
}

/// Pull the `image` field out of the form, draining the rest.
///
/// Reading stops one byte past `max_bytes` so oversized files are rejected
/// without being buffered whole.
async fn read_image_field(mut payload: Multipart, max_bytes: usize) -> Result<AvatarUpload, ReadError> {
    let mut upload = None;

    while let Some(mut field) = payload.try_next().await? {
        let disposition = field.content_disposition();
        if upload.is_some() || disposition.get_name() != Some(IMAGE_FIELD) {
            while field.try_next().await?.is_some() {}
            continue;
        }

        let file_name = disposition.get_filename().map(str::to_string);
        let content_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            bytes.extend_from_slice(&chunk);
            if bytes.len() > max_bytes {
                return Err(ReadError::Domain(
                    ValidationError::ImageTooLarge { max_bytes }.into(),
                ));
            }
        }

        upload = Some(AvatarUpload {
            content_type,
            file_name,
            bytes,
        });
    }

    upload.ok_or_else(|| ReadError::Domain(ValidationError::required(IMAGE_FIELD).into()))
}

fn invalid_upload(err: &MultipartError, lang: Language) -> HttpResponse {
    tracing::debug!(event = "invalid_upload", error = %err, "Malformed multipart body");
    HttpResponse::build(StatusCode::BAD_REQUEST).json(ErrorResponse::new(
        error_codes::INVALID_UPLOAD,
        localize(messages::INVALID_UPLOAD, lang),
    ))
}

/// Handler for POST /api/users/profile/image
///
/// Expects `multipart/form-data` with the file in the `image` field.
/// Responds with the absolute URL of the stored image.
pub async fn upload_profile_image<U, V, P, M, F>(
    req: HttpRequest,
    state: web::Data<AppState<U, V, P, M, F>>,
    auth: AuthContext,
    payload: Multipart,
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

    let upload = match read_image_field(payload, state.settings.max_avatar_bytes).await {
        Ok(upload) => upload,
        Err(ReadError::Multipart(e)) => return invalid_upload(&e, lang),
        Err(ReadError::Domain(e)) => return handle_domain_error(&e, lang, expose),
    };

    match state.account_service.upload_avatar(auth.user_id, upload).await {
        Ok(path) => HttpResponse::Ok().json(ImageUploadResponse {
            success: true,
            image_url: construct_full_url(
                &req,
                state.settings.public_base_url.as_deref(),
                Some(&path),
            ),
        }),
        Err(e) => handle_domain_error(&e, lang, expose),
    }
}

/// Handler for DELETE /api/users/profile/image
pub async fn remove_profile_image<U, V, P, M, F>(
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
    match state.account_service.remove_avatar(auth.user_id).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::ok()),
        Err(e) => handle_domain_error(
            &e,
            extract_language(&req),
            state.settings.expose_error_details,
        ),
    }
}

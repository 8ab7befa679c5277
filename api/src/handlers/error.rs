//! Mapping of domain errors to localized JSON error responses

use actix_web::{
    error::{InternalError, JsonPayloadError, PathError},
    http::{header, StatusCode},
    HttpRequest, HttpResponse,
};
use validator::ValidationErrors;

use mz_core::{localize, AccountError, DomainError};
use mz_shared::{error_codes, ErrorResponse, Language};

use super::messages;

/// Language preference from the Accept-Language header (Ukrainian by default)
pub fn extract_language(req: &HttpRequest) -> Language {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}

fn respond(status: StatusCode, body: ErrorResponse) -> HttpResponse {
    HttpResponse::build(status).json(body)
}

/// Handle domain errors with language support
///
/// `expose_details` attaches the raw downstream message to 500 responses.
pub fn handle_domain_error(error: &DomainError, lang: Language, expose_details: bool) -> HttpResponse {
    match error {
        DomainError::Account(account_error) => {
            let message = localize(&account_error.to_string(), lang);
            match account_error {
                AccountError::UserNotFound
                | AccountError::ProductNotFound
                | AccountError::PurchaseNotFound => {
                    tracing::debug!(code = account_error.code(), "Resource not found");
                    respond(StatusCode::NOT_FOUND, ErrorResponse::new(account_error.code(), message))
                }
                AccountError::MailDeliveryFailed { reason } => {
                    tracing::error!(event = "mail_delivery_failed", reason = %reason, "Email could not be sent");
                    let mut body = ErrorResponse::new(account_error.code(), message);
                    if expose_details {
                        body = body.with_details(reason.as_str());
                    }
                    respond(StatusCode::INTERNAL_SERVER_ERROR, body)
                }
                _ => {
                    tracing::debug!(code = account_error.code(), "Request rejected");
                    respond(StatusCode::BAD_REQUEST, ErrorResponse::new(account_error.code(), message))
                }
            }
        }
        DomainError::ValidationErr(validation_error) => respond(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(
                validation_error.code(),
                localize(&validation_error.to_string(), lang),
            ),
        ),
        DomainError::Validation { message } => respond(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, localize(message, lang)),
        ),
        DomainError::NotFound { resource } => respond(
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, localize(resource, lang)),
        ),
        DomainError::Unauthorized => respond(
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::UNAUTHORIZED, localize(messages::AUTH_REQUIRED, lang)),
        ),
        DomainError::Forbidden { message } => {
            tracing::warn!(event = "forbidden", "Forbidden request");
            respond(
                StatusCode::FORBIDDEN,
                ErrorResponse::new(error_codes::FORBIDDEN, localize(message, lang)),
            )
        }
        DomainError::Internal { message } => {
            tracing::error!(event = "internal_error", error = %message, "Internal error");
            let mut body = ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                localize(messages::INTERNAL_ERROR, lang),
            );
            if expose_details {
                body = body.with_details(message.as_str());
            }
            respond(StatusCode::INTERNAL_SERVER_ERROR, body)
        }
    }
}

/// 400 for DTO constraint violations, naming the offending fields
pub fn handle_validation_errors(errors: &ValidationErrors, lang: Language) -> HttpResponse {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();
    let fields = fields.join(", ");

    tracing::debug!(event = "dto_validation_failed", fields = %fields, "Request validation failed");

    let message = lang.pick(
        &format!("Invalid fields: {}", fields),
        &format!("Невірні поля: {}", fields),
    )
    .to_string();
    respond(
        StatusCode::BAD_REQUEST,
        ErrorResponse::new(error_codes::VALIDATION_ERROR, message),
    )
}

/// JSON extractor error handler: malformed bodies become 400 `INVALID_JSON`
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    let lang = extract_language(req);
    tracing::debug!(event = "invalid_json", error = %err, "Malformed JSON body");
    let response = respond(
        StatusCode::BAD_REQUEST,
        ErrorResponse::new(error_codes::INVALID_JSON, localize(messages::INVALID_JSON, lang)),
    );
    InternalError::from_response(err, response).into()
}

/// Path extractor error handler: unparsable segments become 400
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    let lang = extract_language(req);
    let response = respond(
        StatusCode::BAD_REQUEST,
        ErrorResponse::new(error_codes::VALIDATION_ERROR, localize(messages::INVALID_PATH, lang)),
    );
    InternalError::from_response(err, response).into()
}

/// Default 404 handler
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    let lang = extract_language(&req);
    respond(
        StatusCode::NOT_FOUND,
        ErrorResponse::new(error_codes::NOT_FOUND, localize(messages::NOT_FOUND, lang)),
    )
}

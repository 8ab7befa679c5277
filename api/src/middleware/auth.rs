//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the bearer token from the Authorization header, verifies it
//! (HS256, `exp` required) and injects an [`AuthContext`] into the request.
//! Tokens are issued by the login service; this API only verifies them.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use mz_core::localize;
use mz_shared::{error_codes, ErrorResponse};

use crate::handlers::error::extract_language;
use crate::handlers::messages;

/// Claims carried by access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a decimal string
    pub sub: String,
    /// Expiry (seconds since the epoch)
    pub exp: i64,
    /// Issued at
    #[serde(default)]
    pub iat: i64,
}

/// User authentication context injected into requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// User ID extracted from JWT claims
    pub user_id: i64,
}

impl AuthContext {
    /// Creates a new authentication context from JWT claims
    pub fn from_claims(claims: &Claims) -> Result<Self, String> {
        claims
            .sub
            .trim()
            .parse::<i64>()
            .map(|user_id| Self { user_id })
            .map_err(|_| format!("Invalid subject: {}", claims.sub))
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    jwt_secret: Arc<str>,
}

impl JwtAuth {
    /// Creates the middleware with the HS256 verification secret
    pub fn with_secret(secret: impl AsRef<str>) -> Self {
        Self {
            jwt_secret: Arc::from(secret.as_ref()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            jwt_secret: Arc::clone(&self.jwt_secret),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    jwt_secret: Arc<str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let jwt_secret = Arc::clone(&self.jwt_secret);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    tracing::debug!(event = "auth_missing_token", path = %req.path(), "No bearer token");
                    return Ok(reject(req));
                }
            };

            let auth_context = match verify_token(&token, &jwt_secret) {
                Ok(context) => context,
                Err(e) => {
                    tracing::debug!(event = "auth_invalid_token", path = %req.path(), error = %e, "Token rejected");
                    return Ok(reject(req));
                }
            };

            req.extensions_mut().insert(auth_context);

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Verify signature and expiry, then read the user id from `sub`
pub fn verify_token(token: &str, secret: &str) -> Result<AuthContext, String> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| format!("Token decode error: {}", e))?;

    AuthContext::from_claims(&token_data.claims)
}

/// 401 rendered as the standard JSON error body
fn unauthorized_response(req: &HttpRequest) -> HttpResponse {
    let lang = extract_language(req);
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHORIZED,
        localize(messages::AUTH_REQUIRED, lang),
    ))
}

/// Short-circuit the chain with a 401
fn reject<B>(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
    let response = unauthorized_response(req.request());
    req.into_response(response).map_into_right_body()
}

fn unauthorized(req: &HttpRequest) -> Error {
    InternalError::from_response("unauthorized", unauthorized_response(req)).into()
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| unauthorized(req));

        ready(result)
    }
}

//! Application state and factory

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use mz_core::repositories::{PurchaseRepository, UserRepository, VerificationCodeRepository};
use mz_core::services::{AccountService, AvatarStorage, EmailChangeService, MailTransport, PurchaseService};
use mz_shared::{AppConfig, Environment, HealthResponse};

use crate::handlers::{json_error_handler, not_found, path_error_handler};
use crate::middleware::{create_cors, JwtAuth};
use crate::routes::{bought_products, users};

/// Settings the HTTP layer needs at request time
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub environment: Environment,
    /// HS256 secret for bearer tokens
    pub jwt_secret: String,
    /// Base for absolute asset URLs; request host when `None`
    pub public_base_url: Option<String>,
    /// Attach raw messages to 500 responses
    pub expose_error_details: bool,
    pub allowed_origins: Vec<String>,
    /// Upload size cap, enforced while reading the multipart stream
    pub max_avatar_bytes: usize,
}

impl ApiSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            environment: config.environment,
            jwt_secret: config.auth.jwt_secret.clone(),
            public_base_url: config.server.public_base_url.clone(),
            expose_error_details: config.server.expose_error_details,
            allowed_origins: config.server.allowed_origins.clone(),
            max_avatar_bytes: config.storage.max_avatar_bytes,
        }
    }
}

/// Application state that holds shared services
pub struct AppState<U, V, P, M, F>
where
    U: UserRepository,
    V: VerificationCodeRepository,
    P: PurchaseRepository,
    M: MailTransport,
    F: AvatarStorage,
{
    pub account_service: Arc<AccountService<U, F>>,
    pub email_change_service: Arc<EmailChangeService<U, V, M>>,
    pub purchase_service: Arc<PurchaseService<P>>,
    pub settings: ApiSettings,
}

/// Create and configure the application with all dependencies
pub fn create_app<U, V, P, M, F>(
    app_state: web::Data<AppState<U, V, P, M, F>>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    V: VerificationCodeRepository + 'static,
    P: PurchaseRepository + 'static,
    M: MailTransport + 'static,
    F: AvatarStorage + 'static,
{
    let settings = app_state.settings.clone();
    let cors = create_cors(settings.environment, &settings.allowed_origins);

    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/users")
                .wrap(JwtAuth::with_secret(&settings.jwt_secret))
                .route("/profile", web::get().to(users::profile::get_profile::<U, V, P, M, F>))
                .route("/profile/name", web::put().to(users::profile::update_name::<U, V, P, M, F>))
                .route(
                    "/change-password",
                    web::post().to(users::password::change_password::<U, V, P, M, F>),
                )
                .route(
                    "/profile/image",
                    web::post().to(users::avatar::upload_profile_image::<U, V, P, M, F>),
                )
                .route(
                    "/profile/image",
                    web::delete().to(users::avatar::remove_profile_image::<U, V, P, M, F>),
                )
                .route("/account", web::delete().to(users::account::delete_account::<U, V, P, M, F>))
                .route(
                    "/email/change/initiate",
                    web::post().to(users::email_change::initiate::<U, V, P, M, F>),
                )
                .route(
                    "/email/change/verify",
                    web::post().to(users::email_change::verify::<U, V, P, M, F>),
                )
                .route(
                    "/email/change/resend-code",
                    web::post().to(users::email_change::resend_code::<U, V, P, M, F>),
                )
                .route(
                    "/resend-material",
                    web::post().to(users::account::resend_material::<U, V, P, M, F>),
                ),
        )
        .service(
            web::scope("/api/bought-products")
                .wrap(JwtAuth::with_secret(&settings.jwt_secret))
                .route("/ids", web::get().to(bought_products::list_ids::<U, V, P, M, F>))
                .route("", web::post().to(bought_products::record::<U, V, P, M, F>))
                .route(
                    "/{product_id}",
                    web::delete().to(bought_products::remove::<U, V, P, M, F>),
                ),
        )
        .default_service(web::route().to(not_found))
        .wrap(cors)
        .wrap(TracingLogger::default())
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy("muza-life-api", env!("CARGO_PKG_VERSION")))
}

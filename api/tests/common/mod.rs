//! Shared fixtures for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use tempfile::TempDir;

use mz_api::middleware::Claims;
use mz_api::{ApiSettings, AppState};
use mz_core::{
    AccountService, AccountServiceConfig, EmailChangeConfig, EmailChangeService,
    MockPurchaseRepository, MockUserRepository, MockVerificationCodeRepository,
    NotificationService, NotificationServiceConfig, PurchaseService, User, VerificationService,
    VerificationServiceConfig,
};
use mz_infra::{LocalAvatarStorage, MockMailTransport};
use mz_shared::Environment;

pub const JWT_SECRET: &str = "integration-test-secret";
pub const PUBLIC_BASE_URL: &str = "https://cdn.muza.test";
pub const UPLOAD_PREFIX: &str = "/uploads/profiles";
pub const PRODUCTS: [i64; 3] = [10, 20, 30];

pub type TestState = AppState<
    MockUserRepository,
    MockVerificationCodeRepository,
    MockPurchaseRepository,
    MockMailTransport,
    LocalAvatarStorage,
>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub users: Arc<MockUserRepository>,
    pub codes: Arc<MockVerificationCodeRepository>,
    pub purchases: Arc<MockPurchaseRepository>,
    pub mail: MockMailTransport,
    pub upload_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let codes = Arc::new(MockVerificationCodeRepository::new());
        let users = Arc::new(MockUserRepository::with_codes(codes.clone()));
        let purchases = Arc::new(MockPurchaseRepository::with_products(PRODUCTS).await);
        let mail = MockMailTransport::new();
        let upload_dir = TempDir::new().expect("temp upload dir");

        let storage = Arc::new(LocalAvatarStorage::new(upload_dir.path(), UPLOAD_PREFIX));
        let account_config = AccountServiceConfig {
            bcrypt_cost: 4,
            max_avatar_bytes: 1024,
        };

        let verification_service = Arc::new(VerificationService::new(
            codes.clone(),
            VerificationServiceConfig::default(),
        ));
        let notification_service = Arc::new(NotificationService::new(
            Arc::new(mail.clone()),
            NotificationServiceConfig::default(),
        ));

        let settings = ApiSettings {
            environment: Environment::Development,
            jwt_secret: JWT_SECRET.to_string(),
            public_base_url: Some(PUBLIC_BASE_URL.to_string()),
            expose_error_details: false,
            allowed_origins: Vec::new(),
            max_avatar_bytes: account_config.max_avatar_bytes,
        };

        let state = web::Data::new(AppState {
            account_service: Arc::new(AccountService::new(users.clone(), storage, account_config)),
            email_change_service: Arc::new(EmailChangeService::new(
                users.clone(),
                verification_service,
                notification_service,
                EmailChangeConfig::default(),
            )),
            purchase_service: Arc::new(PurchaseService::new(purchases.clone())),
            settings,
        });

        Self {
            state,
            users,
            codes,
            purchases,
            mail,
            upload_dir,
        }
    }

    /// Seed a user and return a bearer header value for it
    pub async fn sign_in(&self, user: User) -> String {
        let id = user.id;
        self.users.insert(user).await;
        bearer(id)
    }
}

pub fn token_for(user_id: i64, secret: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: (now + Duration::hours(1)).timestamp(),
        iat: now.timestamp(),
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .expect("token encodes")
}

pub fn bearer(user_id: i64) -> String {
    format!("Bearer {}", token_for(user_id, JWT_SECRET))
}

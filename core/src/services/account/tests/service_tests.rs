//! Unit tests for account service

use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::{VerificationCode, VerificationPurpose};
use crate::errors::{AccountError, DomainError, ValidationError};
use crate::repositories::{MockUserRepository, MockVerificationCodeRepository, UserRepository};
use crate::services::account::{AccountService, AccountServiceConfig, AvatarUpload};

use super::mocks::MockAvatarStorage;

const TEST_COST: u32 = 4;

struct Fixture {
    service: AccountService<MockUserRepository, MockAvatarStorage>,
    users: Arc<MockUserRepository>,
    codes: Arc<MockVerificationCodeRepository>,
    storage: Arc<MockAvatarStorage>,
}

fn fixture_with_storage(storage: MockAvatarStorage) -> Fixture {
    let codes = Arc::new(MockVerificationCodeRepository::new());
    let users = Arc::new(MockUserRepository::with_codes(codes.clone()));
    let storage = Arc::new(storage);
    let config = AccountServiceConfig {
        bcrypt_cost: TEST_COST,
        max_avatar_bytes: 1024,
    };
    let service = AccountService::new(users.clone(), storage.clone(), config);
    Fixture {
        service,
        users,
        codes,
        storage,
    }
}

fn fixture() -> Fixture {
    fixture_with_storage(MockAvatarStorage::new(false))
}

fn user_with_password(id: i64, email: &str, password: &str) -> User {
    User::new(id, email, "Anna").with_password_hash(bcrypt::hash(password, TEST_COST).unwrap())
}

fn png(bytes: usize) -> AvatarUpload {
    AvatarUpload {
        content_type: "image/png".to_string(),
        file_name: Some("me.png".to_string()),
        bytes: vec![7; bytes],
    }
}

#[tokio::test]
async fn test_get_profile_missing_user() {
    let f = fixture();
    let result = f.service.get_profile(404).await;
    assert!(matches!(result, Err(DomainError::Account(AccountError::UserNotFound))));
}

#[tokio::test]
async fn test_update_name_trims_and_persists() {
    let f = fixture();
    f.users.insert(User::new(1, "a@x.com", "Old")).await;

    let user = f.service.update_name(1, "  Nova  ").await.unwrap();

    assert_eq!(user.name, "Nova");
    assert_eq!(f.users.get(1).await.unwrap().name, "Nova");
}

#[tokio::test]
async fn test_update_name_rejects_blank() {
    let f = fixture();
    f.users.insert(User::new(1, "a@x.com", "Old")).await;

    let result = f.service.update_name(1, "   ").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))
    ));

    let result = f.service.update_name(2, "Name").await;
    assert!(matches!(result, Err(DomainError::Account(AccountError::UserNotFound))));
}

#[tokio::test]
async fn test_change_password_with_correct_old_password() {
    let f = fixture();
    f.users.insert(user_with_password(1, "a@x.com", "secret1")).await;

    f.service.change_password(1, "secret1", "brand-new").await.unwrap();

    let stored = f.users.get(1).await.unwrap().password_hash.unwrap();
    assert!(bcrypt::verify("brand-new", &stored).unwrap());
    assert!(!bcrypt::verify("secret1", &stored).unwrap());
}

#[tokio::test]
async fn test_change_password_wrong_old_password_keeps_hash() {
    let f = fixture();
    f.users.insert(user_with_password(1, "a@x.com", "secret1")).await;
    let before = f.users.get(1).await.unwrap().password_hash;

    let result = f.service.change_password(1, "not-it", "brand-new").await;

    assert!(matches!(result, Err(DomainError::Account(AccountError::IncorrectPassword))));
    assert_eq!(f.users.get(1).await.unwrap().password_hash, before);
}

#[tokio::test]
async fn test_change_password_validation_runs_before_lookup() {
    let f = fixture();

    let result = f.service.change_password(1, "", "brand-new").await;
    assert!(matches!(result, Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))));

    let result = f.service.change_password(1, "secret1", "12345").await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::PasswordTooShort { min: 6 }))
    ));

    let result = f.service.change_password(1, "secret1", "123456").await;
    assert!(matches!(result, Err(DomainError::Account(AccountError::UserNotFound))));
}

#[tokio::test]
async fn test_federated_account_sets_first_password() {
    let f = fixture();
    let mut user = User::new(1, "g@x.com", "Google user");
    user.auth_provider = Some("google".to_string());
    f.users.insert(user).await;

    f.service.change_password(1, "anything", "first-pass").await.unwrap();

    let stored = f.users.get(1).await.unwrap().password_hash.unwrap();
    assert!(bcrypt::verify("first-pass", &stored).unwrap());
}

#[tokio::test]
async fn test_upload_avatar_replaces_previous_file() {
    let f = fixture();
    f.users.insert(User::new(1, "a@x.com", "Anna")).await;

    let first = f.service.upload_avatar(1, png(10)).await.unwrap();
    let second = f.service.upload_avatar(1, png(20)).await.unwrap();

    assert_ne!(first, second);
    assert!(second.starts_with("/uploads/profiles/"));
    assert!(second.ends_with(".png"));
    assert!(!f.storage.contains(&first));
    assert!(f.storage.contains(&second));
    assert_eq!(f.users.get(1).await.unwrap().avatar_url, Some(second));
}

#[tokio::test]
async fn test_upload_avatar_rejects_non_images_and_large_files() {
    let f = fixture();
    f.users.insert(User::new(1, "a@x.com", "Anna")).await;

    let mut pdf = png(10);
    pdf.content_type = "application/pdf".to_string();
    let result = f.service.upload_avatar(1, pdf).await;
    assert!(matches!(result, Err(DomainError::ValidationErr(ValidationError::InvalidImage))));

    let result = f.service.upload_avatar(1, png(1025)).await;
    assert!(matches!(
        result,
        Err(DomainError::ValidationErr(ValidationError::ImageTooLarge { max_bytes: 1024 }))
    ));

    let result = f.service.upload_avatar(1, png(0)).await;
    assert!(matches!(result, Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))));

    assert_eq!(f.storage.count(), 0);
}

#[tokio::test]
async fn test_upload_avatar_stores_under_mime_extension() {
    let f = fixture();
    f.users.insert(User::new(1, "a@x.com", "Anna")).await;

    let mut disguised = png(10);
    disguised.file_name = Some("a.html".to_string());
    let path = f.service.upload_avatar(1, disguised).await.unwrap();
    assert!(path.ends_with(".png"));

    let mut svg = png(10);
    svg.content_type = "image/svg+xml".to_string();
    svg.file_name = Some("a.svg".to_string());
    let result = f.service.upload_avatar(1, svg).await;
    assert!(matches!(result, Err(DomainError::ValidationErr(ValidationError::InvalidImage))));

    assert_eq!(f.storage.count(), 1);
}

#[tokio::test]
async fn test_upload_avatar_storage_failure_is_internal() {
    let f = fixture_with_storage(MockAvatarStorage::new(true));
    f.users.insert(User::new(1, "a@x.com", "Anna")).await;

    let result = f.service.upload_avatar(1, png(10)).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
    assert_eq!(f.users.get(1).await.unwrap().avatar_url, None);
}

#[tokio::test]
async fn test_remove_avatar_clears_path_and_file() {
    let f = fixture();
    f.users.insert(User::new(1, "a@x.com", "Anna")).await;
    let path = f.service.upload_avatar(1, png(10)).await.unwrap();

    f.service.remove_avatar(1).await.unwrap();

    assert!(!f.storage.contains(&path));
    assert_eq!(f.users.get(1).await.unwrap().avatar_url, None);
}

#[tokio::test]
async fn test_remove_avatar_without_avatar_or_file_succeeds() {
    let f = fixture_with_storage(MockAvatarStorage::new(true));
    let mut user = User::new(1, "a@x.com", "Anna");
    user.avatar_url = Some("/uploads/profiles/gone.png".to_string());
    f.users.insert(user).await;
    f.users.insert(User::new(2, "b@x.com", "Bob")).await;

    f.service.remove_avatar(1).await.unwrap();
    f.service.remove_avatar(2).await.unwrap();
    f.service.remove_avatar(3).await.unwrap();

    assert_eq!(f.users.get(1).await.unwrap().avatar_url, None);
}

#[tokio::test]
async fn test_delete_account_removes_user_codes_and_avatar() {
    let f = fixture();
    f.users.insert(User::new(1, "a@x.com", "Anna")).await;
    let path = f.service.upload_avatar(1, png(10)).await.unwrap();
    f.codes
        .seed(VerificationCode::new("a@x.com".to_string(), VerificationPurpose::Registration))
        .await;

    f.service.delete_account(1).await.unwrap();

    assert!(f.users.find_by_id(1).await.unwrap().is_none());
    assert!(f.codes.codes_for("a@x.com").await.is_empty());
    assert!(!f.storage.contains(&path));

    f.service.delete_account(1).await.unwrap();
}

#[tokio::test]
async fn test_resend_material_is_acknowledged() {
    let f = fixture();
    f.service
        .resend_material(1, Some("Workbook"), Some("2024-05-01"))
        .await
        .unwrap();
    f.service.resend_material(1, None, None).await.unwrap();
}

#[tokio::test]
async fn test_repository_failure_surfaces() {
    let f = fixture();
    f.users.set_should_fail(true);

    assert!(matches!(f.service.get_profile(1).await, Err(DomainError::Internal { .. })));
    assert!(matches!(f.service.delete_account(1).await, Err(DomainError::Internal { .. })));
}

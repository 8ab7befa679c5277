//! Unit tests for verification service

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::verification_code::{VerificationCode, VerificationPurpose, CODE_LENGTH};
use crate::errors::DomainError;
use crate::repositories::MockVerificationCodeRepository;
use crate::services::verification::{VerificationService, VerificationServiceConfig};

fn service() -> (
    VerificationService<MockVerificationCodeRepository>,
    Arc<MockVerificationCodeRepository>,
) {
    let codes = Arc::new(MockVerificationCodeRepository::new());
    let service = VerificationService::new(codes.clone(), VerificationServiceConfig::default());
    (service, codes)
}

fn fixed_code(email: &str, code: &str, expires_in_minutes: i64) -> VerificationCode {
    let mut entity = VerificationCode::new(email.to_string(), VerificationPurpose::EmailChange);
    entity.code = code.to_string();
    entity.expires_at = Utc::now() + Duration::minutes(expires_in_minutes);
    entity
}

#[tokio::test]
async fn test_create_code_stores_six_digit_code() {
    let (service, codes) = service();

    let issued = service
        .create_code("b@x.com", VerificationPurpose::EmailChange)
        .await
        .unwrap();

    assert_eq!(issued.code.len(), CODE_LENGTH);
    assert_eq!(issued.purpose, VerificationPurpose::EmailChange);
    assert!(issued.id > 0);
    assert_eq!(codes.active_codes_for("b@x.com").await, vec![issued]);
}

#[tokio::test]
async fn test_create_code_twice_leaves_one_active_code() {
    let (service, codes) = service();

    let first = service
        .create_code("e@x.com", VerificationPurpose::EmailChange)
        .await
        .unwrap();
    let second = service
        .create_code("e@x.com", VerificationPurpose::Registration)
        .await
        .unwrap();

    let active = codes.active_codes_for("e@x.com").await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second.id);

    let all = codes.codes_for("e@x.com").await;
    assert_eq!(all.len(), 2);
    assert!(all.iter().find(|c| c.id == first.id).unwrap().is_used);
}

#[tokio::test]
async fn test_create_code_does_not_touch_other_emails() {
    let (service, codes) = service();

    service.create_code("a@x.com", VerificationPurpose::EmailChange).await.unwrap();
    service.create_code("b@x.com", VerificationPurpose::EmailChange).await.unwrap();

    assert_eq!(codes.active_codes_for("a@x.com").await.len(), 1);
    assert_eq!(codes.active_codes_for("b@x.com").await.len(), 1);
}

#[tokio::test]
async fn test_code_is_accepted_at_most_once() {
    let (service, _codes) = service();
    let issued = service
        .create_code("e@x.com", VerificationPurpose::EmailChange)
        .await
        .unwrap();

    let first = service.verify_code("e@x.com", &issued.code).await.unwrap();
    assert!(first.is_valid);
    assert!(first.error_message.is_none());

    let second = service.verify_code("e@x.com", &issued.code).await.unwrap();
    assert!(!second.is_valid);
}

#[tokio::test]
async fn test_expired_code_never_validates() {
    let (service, codes) = service();
    codes.seed(fixed_code("e@x.com", "123456", -1)).await;

    let result = service.verify_code("e@x.com", "123456").await.unwrap();

    assert!(!result.is_valid);
    assert!(!service.has_pending_verification("e@x.com").await.unwrap());
}

#[tokio::test]
async fn test_wrong_and_expired_codes_share_one_message() {
    let (service, codes) = service();
    codes.seed(fixed_code("old@x.com", "111111", -5)).await;
    codes.seed(fixed_code("new@x.com", "222222", 10)).await;

    let expired = service.verify_code("old@x.com", "111111").await.unwrap();
    let wrong = service.verify_code("new@x.com", "000000").await.unwrap();

    assert_eq!(expired.error_message, wrong.error_message);
    assert!(wrong
        .error_message
        .unwrap()
        .contains("Невірний або прострочений код"));
}

#[tokio::test]
async fn test_code_for_other_email_is_rejected() {
    let (service, codes) = service();
    codes.seed(fixed_code("a@x.com", "123456", 10)).await;

    let result = service.verify_code("b@x.com", "123456").await.unwrap();
    assert!(!result.is_valid);
    assert_eq!(codes.active_codes_for("a@x.com").await.len(), 1);
}

#[tokio::test]
async fn test_purpose_scoped_verification() {
    let (service, codes) = service();
    let mut registration = fixed_code("e@x.com", "123456", 10);
    registration.purpose = VerificationPurpose::Registration;
    codes.seed(registration).await;

    let result = service
        .verify_code_for("e@x.com", "123456", VerificationPurpose::EmailChange)
        .await
        .unwrap();
    assert!(!result.is_valid);
    assert_eq!(codes.active_codes_for("e@x.com").await.len(), 1);

    let result = service
        .verify_code_for("e@x.com", "123456", VerificationPurpose::Registration)
        .await
        .unwrap();
    assert!(result.is_valid);
    assert!(codes.active_codes_for("e@x.com").await.is_empty());
}

#[tokio::test]
async fn test_malformed_code_skips_store() {
    let (service, codes) = service();
    codes.set_should_fail(true);

    for code in ["12345", "1234567", "12a456", ""] {
        let result = service.verify_code("e@x.com", code).await.unwrap();
        assert!(!result.is_valid);
    }
}

#[tokio::test]
async fn test_pending_tracks_issue_and_consumption() {
    let (service, _codes) = service();
    assert!(!service.has_pending_verification("e@x.com").await.unwrap());

    let issued = service
        .create_code("e@x.com", VerificationPurpose::Registration)
        .await
        .unwrap();
    assert!(service.has_pending_verification("e@x.com").await.unwrap());

    service.verify_code("e@x.com", &issued.code).await.unwrap();
    assert!(!service.has_pending_verification("e@x.com").await.unwrap());
}

#[tokio::test]
async fn test_superseded_code_no_longer_validates() {
    let (service, codes) = service();
    let old = codes.seed(fixed_code("e@x.com", "123456", 10)).await;

    let replacement = service
        .create_code("e@x.com", VerificationPurpose::EmailChange)
        .await
        .unwrap();

    if replacement.code != old.code {
        assert!(!service.verify_code("e@x.com", &old.code).await.unwrap().is_valid);
    }
    assert!(service.has_pending_verification("e@x.com").await.unwrap());
    assert!(service.verify_code("e@x.com", &replacement.code).await.unwrap().is_valid);
    assert!(!service.has_pending_verification("e@x.com").await.unwrap());
}

#[tokio::test]
async fn test_store_failure_surfaces_as_internal_error() {
    let (service, codes) = service();
    codes.set_should_fail(true);

    let result = service.create_code("e@x.com", VerificationPurpose::EmailChange).await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));

    let result = service.verify_code("e@x.com", "123456").await;
    assert!(matches!(result, Err(DomainError::Internal { .. })));
}

#[tokio::test]
async fn test_discard_code_removes_row_and_ignores_failures() {
    let (service, codes) = service();
    codes.seed(fixed_code("e@x.com", "123456", 10)).await;

    service.discard_code("e@x.com", "123456").await;
    assert!(codes.codes_for("e@x.com").await.is_empty());

    codes.set_should_fail(true);
    service.discard_code("e@x.com", "123456").await;
}

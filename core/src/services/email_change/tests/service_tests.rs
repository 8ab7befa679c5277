//! Unit tests for the email change flow

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::domain::entities::verification_code::{VerificationCode, VerificationPurpose};
use crate::errors::{AccountError, DomainError, ValidationError};
use crate::repositories::{MockUserRepository, MockVerificationCodeRepository};
use crate::services::email_change::{EmailChangeConfig, EmailChangeService};
use crate::services::notification::tests::mocks::RecordingMailTransport;
use crate::services::notification::{NotificationService, NotificationServiceConfig};
use crate::services::verification::{VerificationService, VerificationServiceConfig};

type Service = EmailChangeService<MockUserRepository, MockVerificationCodeRepository, RecordingMailTransport>;

struct Fixture {
    service: Service,
    users: Arc<MockUserRepository>,
    codes: Arc<MockVerificationCodeRepository>,
    mail: Arc<RecordingMailTransport>,
}

async fn fixture_with(mail_fails: bool, notify_previous_email: bool) -> Fixture {
    let codes = Arc::new(MockVerificationCodeRepository::new());
    let users = Arc::new(MockUserRepository::with_codes(codes.clone()));
    let mail = Arc::new(RecordingMailTransport::new(mail_fails));

    users.insert(User::new(1, "a@x.com", "Anna")).await;
    users.insert(User::new(2, "taken@x.com", "Taras")).await;

    let verification = Arc::new(VerificationService::new(
        codes.clone(),
        VerificationServiceConfig::default(),
    ));
    let notifications = Arc::new(NotificationService::new(
        mail.clone(),
        NotificationServiceConfig::default(),
    ));
    let service = EmailChangeService::new(
        users.clone(),
        verification,
        notifications,
        EmailChangeConfig {
            notify_previous_email,
        },
    );

    Fixture {
        service,
        users,
        codes,
        mail,
    }
}

async fn fixture() -> Fixture {
    fixture_with(false, false).await
}

fn planted_code(email: &str, code: &str) -> VerificationCode {
    let mut entity = VerificationCode::new(email.to_string(), VerificationPurpose::EmailChange);
    entity.code = code.to_string();
    entity
}

#[tokio::test]
async fn test_initiate_sends_code_to_new_address() {
    let f = fixture().await;

    let initiated = f.service.initiate(1, "b@x.com").await.unwrap();

    assert_eq!(initiated.email, "b@x.com");
    assert_eq!(initiated.current_email, "a@x.com");
    assert_eq!(f.mail.sent_to("b@x.com").len(), 1);
    assert!(f.mail.sent_to("a@x.com").is_empty());

    let active = f.codes.active_codes_for("b@x.com").await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].purpose, VerificationPurpose::EmailChange);
    assert_eq!(f.mail.last_code_sent_to("b@x.com"), Some(active[0].code.clone()));
}

#[tokio::test]
async fn test_initiate_to_taken_address_issues_no_code() {
    let f = fixture().await;

    let result = f.service.initiate(1, "taken@x.com").await;

    assert!(matches!(result, Err(DomainError::Account(AccountError::EmailExists))));
    assert!(f.codes.codes_for("taken@x.com").await.is_empty());
    assert_eq!(f.mail.count(), 0);
}

#[tokio::test]
async fn test_initiate_precondition_order() {
    let f = fixture().await;

    let result = f.service.initiate(1, "").await;
    assert!(matches!(result, Err(DomainError::ValidationErr(ValidationError::RequiredField { .. }))));

    let result = f.service.initiate(99, "not-an-email").await;
    assert!(matches!(result, Err(DomainError::ValidationErr(ValidationError::InvalidEmail))));

    let result = f.service.initiate(99, "b@x.com").await;
    assert!(matches!(result, Err(DomainError::Account(AccountError::UserNotFound))));

    let result = f.service.initiate(1, "a@x.com").await;
    assert!(matches!(result, Err(DomainError::Account(AccountError::SameEmail))));

    assert_eq!(f.mail.count(), 0);
}

#[tokio::test]
async fn test_initiate_refuses_while_code_pending() {
    let f = fixture().await;
    f.service.initiate(1, "b@x.com").await.unwrap();

    let result = f.service.initiate(1, "b@x.com").await;

    assert!(matches!(result, Err(DomainError::Account(AccountError::PendingEmailChange))));
    assert_eq!(f.mail.count(), 1);
    assert_eq!(f.codes.codes_for("b@x.com").await.len(), 1);
}

#[tokio::test]
async fn test_initiate_mail_failure_discards_code() {
    let f = fixture_with(true, false).await;

    let result = f.service.initiate(1, "b@x.com").await;

    assert!(matches!(
        result,
        Err(DomainError::Account(AccountError::MailDeliveryFailed { .. }))
    ));
    assert!(f.codes.codes_for("b@x.com").await.is_empty());
}

#[tokio::test]
async fn test_change_scenario_commits_and_removes_code() {
    let f = fixture().await;
    f.codes.seed(planted_code("b@x.com", "123456")).await;

    let changed = f.service.verify(1, "b@x.com", "123456").await.unwrap();

    assert_eq!(changed.id, 1);
    assert_eq!(changed.email, "b@x.com");
    assert_eq!(f.users.get(1).await.unwrap().email, "b@x.com");
    assert!(f.codes.codes_for("b@x.com").await.is_empty());
}

#[tokio::test]
async fn test_wrong_code_keeps_email() {
    let f = fixture().await;
    f.codes.seed(planted_code("b@x.com", "123456")).await;

    let result = f.service.verify(1, "b@x.com", "000000").await;

    assert!(matches!(
        result,
        Err(DomainError::Account(AccountError::InvalidVerificationCode))
    ));
    assert_eq!(f.users.get(1).await.unwrap().email, "a@x.com");
    assert_eq!(f.codes.active_codes_for("b@x.com").await.len(), 1);
}

#[tokio::test]
async fn test_registration_code_cannot_change_email() {
    let f = fixture().await;
    let mut code = planted_code("b@x.com", "123456");
    code.purpose = VerificationPurpose::Registration;
    f.codes.seed(code).await;

    let result = f.service.verify(1, "b@x.com", "123456").await;

    assert!(matches!(
        result,
        Err(DomainError::Account(AccountError::InvalidVerificationCode))
    ));
    assert_eq!(f.users.get(1).await.unwrap().email, "a@x.com");
    assert_eq!(f.codes.active_codes_for("b@x.com").await.len(), 1);
}

#[tokio::test]
async fn test_expired_code_is_invalid() {
    let f = fixture().await;
    let mut code = planted_code("b@x.com", "123456");
    code.expires_at = Utc::now() - Duration::minutes(1);
    f.codes.seed(code).await;

    let result = f.service.verify(1, "b@x.com", "123456").await;

    assert!(matches!(
        result,
        Err(DomainError::Account(AccountError::InvalidVerificationCode))
    ));
}

#[tokio::test]
async fn test_full_flow_with_mailed_code() {
    let f = fixture().await;
    f.service.initiate(1, "b@x.com").await.unwrap();
    let code = f.mail.last_code_sent_to("b@x.com").unwrap();

    f.service.verify(1, "b@x.com", &code).await.unwrap();

    assert_eq!(f.users.get(1).await.unwrap().email, "b@x.com");
    let again = f.service.verify(1, "b@x.com", &code).await;
    assert!(matches!(
        again,
        Err(DomainError::Account(AccountError::InvalidVerificationCode))
    ));
}

#[tokio::test]
async fn test_verify_when_address_claimed_meanwhile() {
    let f = fixture().await;
    f.codes.seed(planted_code("taken@x.com", "123456")).await;

    let result = f.service.verify(1, "taken@x.com", "123456").await;

    assert!(matches!(result, Err(DomainError::Account(AccountError::UserExists))));
    assert_eq!(f.users.get(1).await.unwrap().email, "a@x.com");
}

#[tokio::test]
async fn test_verify_for_missing_user() {
    let f = fixture().await;
    f.codes.seed(planted_code("b@x.com", "123456")).await;

    let result = f.service.verify(42, "b@x.com", "123456").await;

    assert!(matches!(result, Err(DomainError::Account(AccountError::UserNotFound))));
}

#[tokio::test]
async fn test_verify_requires_fields() {
    let f = fixture().await;

    let result = f.service.verify(1, "", "123456").await;
    assert!(matches!(result, Err(DomainError::ValidationErr(_))));

    let result = f.service.verify(1, "b@x.com", " ").await;
    assert!(matches!(result, Err(DomainError::ValidationErr(_))));
}

#[tokio::test]
async fn test_previous_address_notice_is_opt_in() {
    let f = fixture().await;
    f.codes.seed(planted_code("b@x.com", "123456")).await;
    f.service.verify(1, "b@x.com", "123456").await.unwrap();
    assert!(f.mail.sent_to("a@x.com").is_empty());

    let f = fixture_with(false, true).await;
    f.codes.seed(planted_code("b@x.com", "123456")).await;
    f.service.verify(1, "b@x.com", "123456").await.unwrap();
    assert_eq!(f.mail.sent_to("a@x.com").len(), 1);
}

#[tokio::test]
async fn test_previous_address_notice_failure_is_swallowed() {
    let f = fixture_with(true, true).await;
    f.codes.seed(planted_code("b@x.com", "123456")).await;

    let changed = f.service.verify(1, "b@x.com", "123456").await.unwrap();
    assert_eq!(changed.email, "b@x.com");
}

#[tokio::test]
async fn test_resend_supersedes_pending_code() {
    let f = fixture().await;
    f.service.initiate(1, "b@x.com").await.unwrap();
    let first = f.mail.last_code_sent_to("b@x.com").unwrap();

    f.service.resend(1, "b@x.com").await.unwrap();
    let second = f.mail.last_code_sent_to("b@x.com").unwrap();

    let active = f.codes.active_codes_for("b@x.com").await;
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].code, second);
    assert_eq!(f.mail.sent_to("b@x.com").len(), 2);
    assert!(f.mail.sent_to("b@x.com")[1].subject.contains("зміни"));

    if first != second {
        let result = f.service.verify(1, "b@x.com", &first).await;
        assert!(result.is_err());
    }
}

#[tokio::test]
async fn test_resend_rejects_taken_and_malformed_addresses() {
    let f = fixture().await;

    let result = f.service.resend(1, "taken@x.com").await;
    assert!(matches!(result, Err(DomainError::Account(AccountError::EmailExists))));

    let result = f.service.resend(1, "nope").await;
    assert!(matches!(result, Err(DomainError::ValidationErr(ValidationError::InvalidEmail))));

    assert_eq!(f.mail.count(), 0);
}

#[tokio::test]
async fn test_resend_mail_failure() {
    let f = fixture_with(true, false).await;

    let result = f.service.resend(1, "b@x.com").await;

    assert!(matches!(
        result,
        Err(DomainError::Account(AccountError::MailDeliveryFailed { .. }))
    ));
}

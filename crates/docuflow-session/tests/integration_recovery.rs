mod common;

use chrono::{Duration, Utc};

use common::{TEST_ADDRESS, TEST_ANSWER, generate_unique_email, seed_account, test_service};
use docuflow_core::AuthError;
use docuflow_models::{AuditAction, Role};
use docuflow_store::AccountStore;

#[tokio::test]
async fn test_recovery_answer_match_mints_reset_token() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, Some(TEST_ANSWER)).await;

    let response = service
        .verify_recovery_answer(&seeded.email, TEST_ANSWER, Utc::now())
        .await
        .unwrap();
    assert!(!response.reset_token.is_empty());
}

#[tokio::test]
async fn test_recovery_answer_normalized_before_compare() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, Some("Blue")).await;

    // stored "Blue", provided with case and padding differences
    service
        .verify_recovery_answer(&seeded.email, "  blue ", Utc::now())
        .await
        .unwrap();
    service
        .verify_recovery_answer(&seeded.email, "BLUE", Utc::now())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_recovery_wrong_answer_is_generic() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, Some(TEST_ANSWER)).await;

    let err = service
        .verify_recovery_answer(&seeded.email, "green", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::BadCredential));
    assert_eq!(err.user_message(), "Invalid credentials");
}

#[tokio::test]
async fn test_recovery_unknown_email_is_generic() {
    let service = test_service();

    let err = service
        .verify_recovery_answer(&generate_unique_email(), TEST_ANSWER, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::AccountNotFound));
    assert_eq!(err.user_message(), "Invalid credentials");
}

#[tokio::test]
async fn test_recovery_without_stored_answer_never_matches() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, None).await;

    let err = service
        .verify_recovery_answer(&seeded.email, "", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::BadCredential));
}

#[tokio::test]
async fn test_three_mismatches_lock_recovery() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, Some(TEST_ANSWER)).await;
    let now = Utc::now();

    for _ in 0..3 {
        let err = service
            .verify_recovery_answer(&seeded.email, "green", now)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::BadCredential));
    }

    let account = service.store().get(seeded.id).await.unwrap().unwrap();
    assert_eq!(account.recovery_attempts, 0);
    assert_eq!(account.recovery_lock_until, Some(now + Duration::seconds(60)));

    // correct answer inside the window still fails
    let err = service
        .verify_recovery_answer(&seeded.email, TEST_ANSWER, now + Duration::seconds(10))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Locked { remaining_seconds: 50 }));

    // and succeeds once the window passes
    service
        .verify_recovery_answer(&seeded.email, TEST_ANSWER, now + Duration::seconds(61))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_recovery_lockout_independent_of_login() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, Some(TEST_ANSWER)).await;
    let now = Utc::now();

    // lock the recovery flow
    for _ in 0..3 {
        let _ = service.verify_recovery_answer(&seeded.email, "green", now).await;
    }

    // login is untouched
    let response = service
        .login(&seeded.email, &seeded.password, TEST_ADDRESS, now)
        .await
        .unwrap();
    assert_eq!(response.account.id, seeded.id);

    let account = service.store().get(seeded.id).await.unwrap().unwrap();
    assert_eq!(account.login_attempts, 0);
    assert!(account.login_lock_until.is_none());
    assert!(account.recovery_lock_until.is_some());
}

#[tokio::test]
async fn test_login_lockout_independent_of_recovery() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, Some(TEST_ANSWER)).await;
    let now = Utc::now();

    for _ in 0..3 {
        let _ = service
            .login(&seeded.email, "WrongPass1!", TEST_ADDRESS, now)
            .await;
    }

    // recovery still works while the login lock holds
    service
        .verify_recovery_answer(&seeded.email, TEST_ANSWER, now)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_recovery_success_resets_counter() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, Some(TEST_ANSWER)).await;
    let now = Utc::now();

    for _ in 0..2 {
        let _ = service.verify_recovery_answer(&seeded.email, "green", now).await;
    }

    service
        .verify_recovery_answer(&seeded.email, TEST_ANSWER, now)
        .await
        .unwrap();

    let account = service.store().get(seeded.id).await.unwrap().unwrap();
    assert_eq!(account.recovery_attempts, 0);
    assert!(account.recovery_lock_until.is_none());
}

#[tokio::test]
async fn test_recovery_audit_trail() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, Some(TEST_ANSWER)).await;
    let now = Utc::now();

    for _ in 0..3 {
        let _ = service.verify_recovery_answer(&seeded.email, "green", now).await;
    }
    service
        .verify_recovery_answer(&seeded.email, TEST_ANSWER, now + Duration::seconds(61))
        .await
        .unwrap();

    let events = service.audit().events().await;
    let actions: Vec<_> = events.iter().map(|e| e.action).collect();

    assert_eq!(
        actions
            .iter()
            .filter(|a| **a == AuditAction::RecoveryFail)
            .count(),
        3
    );
    assert_eq!(
        actions
            .iter()
            .filter(|a| **a == AuditAction::RecoveryLockout)
            .count(),
        1
    );
    assert_eq!(*actions.last().unwrap(), AuditAction::RecoveryVerify);
}

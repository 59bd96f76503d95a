mod common;

use chrono::{Duration, Utc};

use common::{TEST_ADDRESS, TEST_ANSWER, seed_account, test_service};
use docuflow_core::{AuthError, PasswordRule};
use docuflow_models::{AuditAction, Role, UserId};
use docuflow_store::AccountStore;

#[tokio::test]
async fn test_change_password_success() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, None).await;
    let now = Utc::now();

    service
        .change_password(seeded.id, "NewPass2@", now)
        .await
        .unwrap();

    // old password no longer works, new one does
    let err = service
        .login(&seeded.email, &seeded.password, TEST_ADDRESS, now)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::BadCredential));

    service
        .login(&seeded.email, "NewPass2@", TEST_ADDRESS, now)
        .await
        .unwrap();

    let account = service.store().get(seeded.id).await.unwrap().unwrap();
    assert_eq!(account.password_changed_at, Some(now));
    assert_eq!(account.password_history.len(), 1);
}

#[tokio::test]
async fn test_change_password_rejects_current() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, None).await;

    let err = service
        .change_password(seeded.id, &seeded.password, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::ReusedPassword));
}

#[tokio::test]
async fn test_change_password_rejects_history_entry() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, None).await;
    let t0 = Utc::now();

    service
        .change_password(seeded.id, "OldPass1!", t0)
        .await
        .unwrap();
    service
        .change_password(seeded.id, "OlderPass2@", t0 + Duration::hours(25))
        .await
        .unwrap();

    // the seeded password is now two changes back, still retained
    let err = service
        .change_password(seeded.id, &seeded.password, t0 + Duration::hours(50))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::ReusedPassword));
    assert_eq!(
        err.user_message(),
        "New password must not match a previously used password"
    );
}

#[tokio::test]
async fn test_change_password_invalid_shape() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, None).await;

    let err = service
        .change_password(seeded.id, "nodigits!", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidFormat(PasswordRule::Digit)));

    // hash untouched
    service
        .login(&seeded.email, &seeded.password, TEST_ADDRESS, Utc::now())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_change_password_cooldown() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, None).await;
    let t0 = Utc::now();

    service
        .change_password(seeded.id, "NewPass2@", t0)
        .await
        .unwrap();

    // 2 hours in: 22 hours of the 24-hour window remain
    let err = service
        .change_password(seeded.id, "ThirdPass3#", t0 + Duration::hours(2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AuthError::Cooldown {
            remaining_seconds: 79_200
        }
    ));
    assert_eq!(
        err.user_message(),
        "Password was changed recently. Try again in 22 hours and 0 minutes."
    );

    // 25 hours in: window passed
    service
        .change_password(seeded.id, "ThirdPass3#", t0 + Duration::hours(25))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_password_history_bounded_to_depth() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, None).await;
    let t0 = Utc::now();

    for i in 0..7 {
        service
            .change_password(
                seeded.id,
                &format!("RotPass{}!", i),
                t0 + Duration::hours(25 * (i + 1)),
            )
            .await
            .unwrap();
    }

    let account = service.store().get(seeded.id).await.unwrap().unwrap();
    assert_eq!(account.password_history.len(), 5);

    // the seeded password has aged out of the history, so it is usable again
    service
        .change_password(seeded.id, &seeded.password, t0 + Duration::hours(25 * 8))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_change_password_unknown_account() {
    let service = test_service();

    let err = service
        .change_password(UserId::new(), "NewPass2@", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::AccountNotFound));
}

#[tokio::test]
async fn test_reset_password_via_recovery_token() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, Some(TEST_ANSWER)).await;
    let now = Utc::now();

    let recovery = service
        .verify_recovery_answer(&seeded.email, TEST_ANSWER, now)
        .await
        .unwrap();

    service
        .reset_password(&recovery.reset_token, "NewPass2@", now)
        .await
        .unwrap();

    service
        .login(&seeded.email, "NewPass2@", TEST_ADDRESS, now)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reset_password_rejects_garbage_token() {
    let service = test_service();

    let err = service
        .reset_password("not-a-token", "NewPass2@", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TokenInvalid));
}

#[tokio::test]
async fn test_reset_password_rejects_access_token() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, None).await;
    let now = Utc::now();

    let login = service
        .login(&seeded.email, &seeded.password, TEST_ADDRESS, now)
        .await
        .unwrap();

    let err = service
        .reset_password(&login.access_token, "NewPass2@", now)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TokenInvalid));
}

#[tokio::test]
async fn test_password_audit_trail() {
    let service = test_service();
    let seeded = seed_account(&service, Role::Employee, None).await;
    let t0 = Utc::now();

    service
        .change_password(seeded.id, "NewPass2@", t0)
        .await
        .unwrap();
    let _ = service
        .change_password(seeded.id, "ThirdPass3#", t0 + Duration::hours(2))
        .await;

    let events = service.audit().events().await;
    assert_eq!(events[0].action, AuditAction::PasswordReset);
    assert_eq!(events[1].action, AuditAction::PasswordResetFail);
    assert_eq!(events[1].details.as_ref().unwrap()["reason"], "COOLDOWN");
}

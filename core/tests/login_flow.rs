//! End-to-end exercise of the account lifecycle through the public API:
//! registration, lockout escalation, OTP challenge, recovery, and
//! refresh-token rotation.

use std::sync::Arc;

use ks_core::domain::entities::user::MAX_LOGIN_ATTEMPTS;
use ks_core::domain::value_objects::requests::{LoginRequest, RegistrationRequest};
use ks_core::repositories::{AccountRepository, InMemoryAccountRepository};
use ks_core::services::{AuthService, AuthServiceConfig, JwtProvider, PasswordHasher};
use ks_shared::JwtConfig;

const PHONE: &str = "13912345678";
const PASSWORD: &str = "s3cure-passw0rd";

fn build_service() -> (
    AuthService<InMemoryAccountRepository>,
    Arc<InMemoryAccountRepository>,
) {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let service = AuthService::new(
        repo.clone(),
        Arc::new(JwtProvider::new(JwtConfig::new("integration-secret"))),
        PasswordHasher::new(4),
        AuthServiceConfig::default(),
    );
    (service, repo)
}

#[tokio::test]
async fn test_full_account_lifecycle() {
    let (service, repo) = build_service();

    // Register
    let registered = service
        .register(RegistrationRequest::new(PHONE, PASSWORD))
        .await;
    assert!(registered.is_success());
    let account_id = registered.into_data().unwrap().id;
    assert!(account_id > 0);

    // A first successful login issues a token pair
    let login = service.login(LoginRequest::new(PHONE, PASSWORD)).await;
    assert!(login.is_success());
    let outcome = login.into_data().unwrap();
    assert!(outcome.success);
    let first_refresh = outcome.refresh_token.unwrap();

    // Repeated wrong passwords escalate to an OTP requirement
    for attempt in 1..=MAX_LOGIN_ATTEMPTS {
        let failed = service.login(LoginRequest::new(PHONE, "wrong")).await;
        assert_eq!(
            failed.error_code.as_deref(),
            Some("INVALID_CREDENTIALS"),
            "attempt {} should fail with invalid credentials",
            attempt
        );
    }

    let account = repo.find_by_phone(PHONE, true).await.unwrap().unwrap();
    assert_eq!(account.access_failed_count(), MAX_LOGIN_ATTEMPTS);
    assert!(account.force_otp_on_login());

    // Even the correct password now yields a challenge instead of tokens
    let challenged = service.login(LoginRequest::new(PHONE, PASSWORD)).await;
    assert!(challenged.is_success());
    let outcome = challenged.into_data().unwrap();
    assert!(outcome.needs_otp);
    assert!(!outcome.success);
    assert!(outcome.access_token.is_none());

    // Supplying a code completes the login and clears the flag
    let recovered = service
        .login(LoginRequest::new(PHONE, PASSWORD).with_otp_code("123456"))
        .await;
    assert!(recovered.is_success());
    let outcome = recovered.into_data().unwrap();
    assert!(outcome.success);
    let second_refresh = outcome.refresh_token.unwrap();
    assert_ne!(second_refresh, first_refresh);

    let account = repo.find_by_phone(PHONE, true).await.unwrap().unwrap();
    assert_eq!(account.access_failed_count(), 0);
    assert!(!account.force_otp_on_login());

    // Refresh rotates the token; the previous value is dead
    let refreshed = service.refresh_token(&second_refresh).await;
    assert!(refreshed.is_success());
    let third_refresh = refreshed.into_data().unwrap().refresh_token.unwrap();
    assert_ne!(third_refresh, second_refresh);

    let replay = service.refresh_token(&second_refresh).await;
    assert_eq!(replay.error_code.as_deref(), Some("INVALID_TOKEN"));

    // The rotated token still works
    let again = service.refresh_token(&third_refresh).await;
    assert!(again.is_success());
}

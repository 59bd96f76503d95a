use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use uuid::Uuid;

use docuflow_config::{AuthConfig, JwtConfig};
use docuflow_core::password::hash_password;
use docuflow_models::{Account, Email, Role, UserId};
use docuflow_session::SessionService;
use docuflow_store::{AccountStore, MemoryAccountStore, MemoryAuditSink};

pub const TEST_PASSWORD: &str = "Secret1!";
#[allow(dead_code)]
pub const TEST_ANSWER: &str = "Blue";
pub const TEST_ADDRESS: &str = "10.0.0.1";

pub type TestService = SessionService<MemoryAccountStore, MemoryAuditSink>;

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        refresh_secret: "test-refresh-secret-at-least-32-characters".to_string(),
        access_token_expiry: 900,
        refresh_token_expiry: 604_800,
        reset_token_expiry: 600,
    }
}

pub fn test_service() -> TestService {
    SessionService::new(
        MemoryAccountStore::new(),
        MemoryAuditSink::new(),
        test_jwt_config(),
        AuthConfig::default(),
    )
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", Uuid::new_v4())
}

#[allow(dead_code)]
pub struct SeededAccount {
    pub id: UserId,
    pub email: String,
    pub password: String,
}

/// Seed an account with the test password and an optional recovery answer.
pub async fn seed_account(
    service: &TestService,
    role: Role,
    security_answer: Option<&str>,
) -> SeededAccount {
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    let mut account = Account::new(Email::new(&email).unwrap(), hashed, role);
    account.first_name = Some(FirstName().fake());
    account.last_name = Some(LastName().fake());
    account.security_answer = security_answer.map(String::from);
    let id = account.id;

    service.store().insert(account).await.unwrap();

    SeededAccount {
        id,
        email,
        password: TEST_PASSWORD.to_string(),
    }
}

//! Authentication service tests

use std::sync::Arc;

use crate::domain::entities::token::TokenType;
use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::TokenValidation;
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};
use crate::repositories::{MockTenantRepository, MockUserRepository, TenantRepository, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::{TokenService, TokenServiceConfig};

use super::{AuthService, RegisterCommand};

struct Fixture {
    service: AuthService,
    users: Arc<MockUserRepository>,
    tenants: Arc<MockTenantRepository>,
}

fn fixture_with(config: TokenServiceConfig) -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let tenants = Arc::new(MockTenantRepository::new());
    let service = AuthService::new(
        users.clone(),
        tenants.clone(),
        Arc::new(TokenService::new(config)),
        PasswordHasher::new(4),
    );
    Fixture {
        service,
        users,
        tenants,
    }
}

fn fixture() -> Fixture {
    fixture_with(TokenServiceConfig::default())
}

async fn seed_user(users: &MockUserRepository, email: &str, password: &str, active: bool) -> User {
    let hash = PasswordHasher::new(4).hash(password).unwrap();
    let mut user = User::new(email, hash, "Jane", "Doe", Role::Tenant);
    if !active {
        user.deactivate();
    }
    users.create(user).await.unwrap()
}

fn registration() -> RegisterCommand {
    RegisterCommand {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "Jane@Example.com".to_string(),
        phone_number: Some("+1 5551234567".to_string()),
        password: "Secret@123".to_string(),
        confirm_password: "Secret@123".to_string(),
        property_address: Some("12 Elm Street".to_string()),
        unit_number: Some("4B".to_string()),
        accept_terms: true,
    }
}

#[tokio::test]
async fn test_login_returns_tokens_and_user() {
    let fx = fixture();
    let stored = seed_user(&fx.users, "jane@example.com", "Secret@123", true).await;

    let response = fx.service.login("jane@example.com", "Secret@123").await.unwrap();

    assert!(!response.tokens.access_token.is_empty());
    assert!(!response.tokens.refresh_token.is_empty());
    assert_eq!(response.tokens.expires_in, 86_400);
    assert_eq!(response.user.id, stored.id);
    assert_eq!(response.user.email, stored.email);
    assert_eq!(response.user.role, Role::Tenant);
    assert!(response.user.last_login_at.is_some());

    let tokens = fx.service.token_service();
    assert!(tokens.verify(&response.tokens.access_token, TokenType::Access).is_ok());
    assert!(tokens.verify(&response.tokens.refresh_token, TokenType::Refresh).is_ok());
}

#[tokio::test]
async fn test_login_rejects_wrong_password_and_unknown_email() {
    let fx = fixture();
    seed_user(&fx.users, "jane@example.com", "Secret@123", true).await;

    let err = fx.service.login("jane@example.com", "Wrong@123").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));

    let err = fx.service.login("nobody@example.com", "Secret@123").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_deactivated_account_cannot_log_in() {
    let fx = fixture();
    seed_user(&fx.users, "gone@example.com", "Secret@123", false).await;

    let err = fx.service.login("gone@example.com", "Secret@123").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccountDisabled)));
}

#[tokio::test]
async fn test_authenticate_resolves_principal() {
    let fx = fixture();
    let user = seed_user(&fx.users, "jane@example.com", "Secret@123", true).await;
    let pair = fx.service.token_service().generate_token_pair(&user.email).unwrap();

    let principal = fx.service.authenticate(&pair.access_token).await.unwrap();
    assert_eq!(principal.user_id, user.id);
    assert_eq!(principal.role, Role::Tenant);

    let err = fx.service.authenticate(&pair.refresh_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::WrongTokenType)));
}

#[tokio::test]
async fn test_authenticate_rejects_deactivated_user() {
    let fx = fixture();
    let mut user = seed_user(&fx.users, "jane@example.com", "Secret@123", true).await;
    let pair = fx.service.token_service().generate_token_pair(&user.email).unwrap();

    user.deactivate();
    fx.users.update(user).await.unwrap();

    let err = fx.service.authenticate(&pair.access_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));
}

#[tokio::test]
async fn test_authenticate_rejects_expired_token() {
    let fx = fixture_with(TokenServiceConfig {
        access_token_expiry_seconds: -10,
        ..TokenServiceConfig::default()
    });
    let user = seed_user(&fx.users, "jane@example.com", "Secret@123", true).await;
    let token = fx.service.token_service().generate_access_token(&user.email).unwrap();

    let err = fx.service.authenticate(&token).await.unwrap_err();
    assert!(matches!(err, DomainError::Token(TokenError::TokenExpired)));
}

#[tokio::test]
async fn test_refresh_keeps_refresh_token() {
    let fx = fixture();
    seed_user(&fx.users, "jane@example.com", "Secret@123", true).await;
    let login = fx.service.login("jane@example.com", "Secret@123").await.unwrap();

    let refreshed = fx.service.refresh(&login.tokens.refresh_token).await.unwrap();
    assert_eq!(refreshed.tokens.refresh_token, login.tokens.refresh_token);
    assert!(refreshed.tokens.expires_in > 0);
    assert!(refreshed.tokens.refresh_expires_in <= 604_800);
    assert_eq!(refreshed.user.email, "jane@example.com");
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let fx = fixture();
    seed_user(&fx.users, "jane@example.com", "Secret@123", true).await;
    let login = fx.service.login("jane@example.com", "Secret@123").await.unwrap();

    let err = fx.service.refresh(&login.tokens.access_token).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidRefreshToken)));
}

#[tokio::test]
async fn test_register_creates_user_and_pending_tenant() {
    let fx = fixture();
    let response = fx.service.register(registration()).await.unwrap();

    assert_eq!(response.user.email, "jane@example.com");
    assert_eq!(response.user.role, Role::Tenant);
    assert!(response.user.is_active);
    assert!(response.user.email_verified);

    let tenant = fx
        .tenants
        .find_by_user_id(response.user.id)
        .await
        .unwrap()
        .expect("tenant profile");
    assert_eq!(tenant.property_address, "12 Elm Street");
    assert_eq!(tenant.unit_number.as_deref(), Some("4B"));
    assert_eq!(tenant.status.as_str(), "PENDING");
}

#[tokio::test]
async fn test_register_without_address_skips_tenant_profile() {
    let fx = fixture();
    let command = RegisterCommand {
        property_address: Some("   ".to_string()),
        ..registration()
    };
    let response = fx.service.register(command).await.unwrap();
    assert!(fx.tenants.find_by_user_id(response.user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_register_rejections() {
    let fx = fixture();

    let mismatch = RegisterCommand {
        confirm_password: "Other@1234".to_string(),
        ..registration()
    };
    let err = fx.service.register(mismatch).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::PasswordMismatch)));

    let no_terms = RegisterCommand {
        accept_terms: false,
        ..registration()
    };
    let err = fx.service.register(no_terms).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::TermsNotAccepted)));

    fx.service.register(registration()).await.unwrap();
    let err = fx.service.register(registration()).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::EmailAlreadyExists)));
}

#[test]
fn test_register_field_validation() {
    let short_name = RegisterCommand {
        first_name: "J".to_string(),
        ..registration()
    };
    assert!(matches!(
        short_name.validate(),
        Err(DomainError::ValidationErr(ValidationError::OutOfRange { .. }))
    ));

    let bad_email = RegisterCommand {
        email: "not-an-email".to_string(),
        ..registration()
    };
    assert!(matches!(
        bad_email.validate(),
        Err(DomainError::ValidationErr(ValidationError::InvalidEmail))
    ));

    let bad_phone = RegisterCommand {
        phone_number: Some("12345".to_string()),
        ..registration()
    };
    assert!(bad_phone.validate().is_err());

    let weak = RegisterCommand {
        password: "password".to_string(),
        confirm_password: "password".to_string(),
        ..registration()
    };
    assert!(matches!(weak.validate(), Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_validate_token_reports_remaining_time() {
    let fx = fixture();
    let token = fx.service.token_service().generate_access_token("jane@example.com").unwrap();

    match fx.service.validate_token(&token) {
        TokenValidation::Valid {
            username,
            remaining_ms,
            should_refresh,
        } => {
            assert_eq!(username, "jane@example.com");
            assert!(remaining_ms > 86_000_000);
            assert!(!should_refresh);
        }
        TokenValidation::Invalid => panic!("token should be valid"),
    }

    assert_eq!(fx.service.validate_token("garbage"), TokenValidation::Invalid);
}

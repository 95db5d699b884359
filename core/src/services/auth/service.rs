//! Authentication service implementation

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::entities::tenant::{Tenant, TenantStatus};
use crate::domain::entities::token::{TokenPair, TokenType};
use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::{AuthResponse, AuthenticatedUser, TokenValidation};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{TenantRepository, UserRepository};
use crate::services::password::{validate_password_strength, PasswordHasher};
use crate::services::token::TokenService;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+\d{1,3}[- ]?)?\d{10}$").expect("valid phone regex"));

/// Self-service tenant registration
#[derive(Debug, Clone, Default)]
pub struct RegisterCommand {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub password: String,
    pub confirm_password: String,
    /// A tenant profile is created when this is non-blank
    pub property_address: Option<String>,
    pub unit_number: Option<String>,
    pub accept_terms: bool,
}

impl RegisterCommand {
    /// Field rules; the password/terms checks with dedicated error codes
    /// run separately in [`AuthService::register`]
    pub fn validate(&self) -> DomainResult<()> {
        check_name("firstName", &self.first_name)?;
        check_name("lastName", &self.last_name)?;

        if self.email.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "email".to_string(),
            }
            .into());
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail.into());
        }

        if let Some(phone) = self.phone_number.as_deref().filter(|p| !p.is_empty()) {
            if !PHONE_RE.is_match(phone) {
                return Err(ValidationError::InvalidFormat {
                    field: "phoneNumber".to_string(),
                }
                .into());
            }
        }

        validate_password_strength(&self.password).map_err(DomainError::validation)?;
        Ok(())
    }
}

fn check_name(field: &str, value: &str) -> DomainResult<()> {
    let length = value.trim().chars().count();
    if length == 0 {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        }
        .into());
    }
    if !(2..=50).contains(&length) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 2,
            max: 50,
        }
        .into());
    }
    Ok(())
}

/// Authentication service
///
/// Tokens carry the user's email as subject. Every authenticated request
/// re-reads the user so a deactivated account loses access immediately.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tenants: Arc<dyn TenantRepository>,
    tokens: Arc<TokenService>,
    passwords: PasswordHasher,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tenants: Arc<dyn TenantRepository>,
        tokens: Arc<TokenService>,
        passwords: PasswordHasher,
    ) -> Self {
        Self {
            users,
            tenants,
            tokens,
            passwords,
        }
    }

    pub fn token_service(&self) -> &TokenService {
        &self.tokens
    }

    /// Verifies credentials and issues a token pair
    ///
    /// # Arguments
    ///
    /// * `email` - Account email, matched case-insensitively
    /// * `password` - Plain text password
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - Unknown email or wrong password
    /// * `AuthError::AccountDisabled` - Correct password on a deactivated account
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);
        let mut user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::warn!(email = %email, "Login failed: unknown account");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.passwords.verify(password, &user.password_hash) {
            tracing::warn!(user_id = user.id, "Login failed: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            tracing::warn!(user_id = user.id, "Login rejected: account disabled");
            return Err(AuthError::AccountDisabled.into());
        }

        user.record_login();
        let user = self.users.update(user).await?;
        let tokens = self.tokens.generate_token_pair(&user.email)?;

        tracing::info!(user_id = user.id, role = %user.role, "User logged in");
        Ok(AuthResponse::new(tokens, user))
    }

    /// Creates an active TENANT account, plus a PENDING tenant profile when
    /// a property address is given, and logs the new user in
    pub async fn register(&self, command: RegisterCommand) -> DomainResult<AuthResponse> {
        command.validate()?;

        if command.password != command.confirm_password {
            return Err(AuthError::PasswordMismatch.into());
        }
        if !command.accept_terms {
            return Err(AuthError::TermsNotAccepted.into());
        }

        let email = normalize_email(&command.email);
        if self.users.exists_by_email(&email).await? {
            tracing::warn!(email = %email, "Registration rejected: email already registered");
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let password_hash = self.passwords.hash(&command.password)?;
        let mut user = User::new(
            email,
            password_hash,
            command.first_name.trim(),
            command.last_name.trim(),
            Role::Tenant,
        );
        user.phone_number = command.phone_number.filter(|p| !p.is_empty());
        user.verify_email();

        let user = self.users.create(user).await.map_err(|e| match e {
            DomainError::Conflict { .. } => DomainError::from(AuthError::EmailAlreadyExists),
            other => other,
        })?;

        if let Some(address) = command
            .property_address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
        {
            let tenant = Tenant::new(user.id, address)
                .with_unit(command.unit_number.filter(|u| !u.trim().is_empty()))
                .with_status(TenantStatus::Pending);
            self.tenants.create(tenant).await?;
            tracing::info!(user_id = user.id, "Tenant profile created at registration");
        }

        let tokens = self.tokens.generate_token_pair(&user.email)?;
        tracing::info!(user_id = user.id, "User registered");
        Ok(AuthResponse::new(tokens, user))
    }

    /// Exchanges a refresh token for a new access token; the refresh token
    /// itself is handed back unchanged
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        let (access_token, refresh_claims) = self
            .tokens
            .refresh_access_token(refresh_token)
            .map_err(|e| {
                tracing::warn!(error = %e, "Token refresh rejected");
                DomainError::from(AuthError::InvalidRefreshToken)
            })?;

        let user = self
            .users
            .find_by_email(&refresh_claims.sub)
            .await?
            .filter(|u| u.is_active)
            .ok_or(AuthError::InvalidRefreshToken)?;

        let access_claims = self.tokens.verify(&access_token, TokenType::Access)?;
        let tokens = TokenPair {
            access_token,
            refresh_token: refresh_token.to_string(),
            expires_in: access_claims.remaining_seconds(),
            refresh_expires_in: refresh_claims.remaining_seconds(),
        };
        Ok(AuthResponse::new(tokens, user))
    }

    pub async fn current_user(&self, user_id: i64) -> DomainResult<User> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Reports whether any access token is currently valid without failing
    pub fn validate_token(&self, token: &str) -> TokenValidation {
        match self.tokens.verify(token, TokenType::Access) {
            Ok(claims) => TokenValidation::Valid {
                remaining_ms: claims.remaining_seconds() * 1000,
                should_refresh: self.tokens.should_refresh(&claims),
                username: claims.sub,
            },
            Err(_) => TokenValidation::Invalid,
        }
    }

    /// Resolves a bearer access token into the principal for a request
    ///
    /// # Errors
    ///
    /// * `TokenError::*` - The token is expired, malformed or not an access token
    /// * `DomainError::Unauthorized` - The account is gone or deactivated
    pub async fn authenticate(&self, access_token: &str) -> DomainResult<AuthenticatedUser> {
        let claims = self.tokens.verify(access_token, TokenType::Access)?;
        if claims.sub.is_empty() {
            return Err(TokenError::MissingClaim {
                claim: "sub".to_string(),
            }
            .into());
        }

        match self.users.find_by_email(&claims.sub).await? {
            Some(user) if user.is_active => Ok(AuthenticatedUser::from(&user)),
            Some(user) => {
                tracing::warn!(user_id = user.id, "Token presented for a disabled account");
                Err(DomainError::Unauthorized)
            }
            None => Err(DomainError::Unauthorized),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

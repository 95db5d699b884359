use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use nbj_core::entities::User;
use nbj_core::services::RegisterCommand;
use nbj_core::{AuthResponse, TokenValidation};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be valid"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Self-service registration; field rules are enforced by the auth service
/// so that mismatch and terms failures keep their own error codes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub property_address: Option<String>,
    #[serde(default)]
    pub unit_number: Option<String>,
    #[serde(default)]
    pub accept_terms: bool,
}

impl From<RegisterRequest> for RegisterCommand {
    fn from(request: RegisterRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: request.phone_number,
            password: request.password,
            confirm_password: request.confirm_password,
            property_address: request.property_address,
            unit_number: request.unit_number,
            accept_terms: request.accept_terms,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateTokenQuery {
    pub token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name(),
            phone_number: user.phone_number.clone(),
            role: user.role.to_string(),
            is_active: user.is_active,
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    pub refresh_expires_in: i64,
    pub user: UserDto,
    pub timestamp: DateTime<Utc>,
}

impl From<AuthResponse> for AuthResponseDto {
    fn from(response: AuthResponse) -> Self {
        Self {
            access_token: response.tokens.access_token,
            refresh_token: response.tokens.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: response.tokens.expires_in,
            refresh_expires_in: response.tokens.refresh_expires_in,
            user: UserDto::from(&response.user),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidationResponse {
    pub valid: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Milliseconds left before expiry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_refresh: Option<bool>,
}

impl From<TokenValidation> for TokenValidationResponse {
    fn from(validation: TokenValidation) -> Self {
        match validation {
            TokenValidation::Valid {
                username,
                remaining_ms,
                should_refresh,
            } => Self {
                valid: true,
                timestamp: Utc::now(),
                username: Some(username),
                remaining_time: Some(remaining_ms),
                should_refresh: Some(should_refresh),
            },
            TokenValidation::Invalid => Self {
                valid: false,
                timestamp: Utc::now(),
                username: None,
                remaining_time: None,
                should_refresh: None,
            },
        }
    }
}

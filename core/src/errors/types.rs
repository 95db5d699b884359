//! Error types for authentication, token handling and input validation
//!
//! The HTTP layer turns each variant into a status code and a stable
//! `errorCode`; the display strings here double as the client message.

use thiserror::Error;

/// Authentication and authorization failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Email address is already registered")]
    EmailAlreadyExists,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Terms and conditions must be accepted")]
    TermsNotAccepted,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("User not found")]
    UserNotFound,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Access denied")]
    AccessDenied,

    #[error("Tenant profile not found")]
    TenantProfileRequired,

    #[error("User already has a tenant profile")]
    TenantProfileExists,
}

/// Token validation and issuance failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token type does not match its use")]
    WrongTokenType,

    #[error("Missing claim: {claim}")]
    MissingClaim { claim: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Input validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
    },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid date: {field}")]
    InvalidDate { field: String },

    #[error("{message}")]
    InvalidStatus { message: String },

    #[error("Rating must be between 1 and 5")]
    InvalidRating,

    #[error("Duplicate value: {field}")]
    DuplicateValue { field: String },
}

//! Mapping from domain failures to HTTP responses
//!
//! Every error leaves the API as an [`ErrorResponse`] body:
//! `{error: true, message, errorCode, timestamp}`.

use std::fmt;

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
use validator::ValidationErrors;

use nbj_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use nbj_shared::{error_codes, ErrorResponse};

const GENERIC_MESSAGE: &str = "An unexpected error occurred";

/// Error returned by handlers; renders itself as JSON
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<serde_json::Value>,
}

pub type ApiResult<T = HttpResponse> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, message)
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, code, message)
    }

    pub fn access_denied() -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            error_codes::ACCESS_DENIED,
            "You do not have permission to access this resource",
        )
    }

    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            GENERIC_MESSAGE,
        )
    }

    /// Replaces the error code while keeping status and message
    pub fn with_code(mut self, code: &'static str) -> Self {
        self.code = code;
        self
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn body(&self) -> ErrorResponse {
        let body = ErrorResponse::new(self.code, self.message.clone());
        match &self.details {
            Some(details) => body.add_detail("fields", details),
            None => body,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.status.as_u16(), self.code, self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(self.body())
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation { message } => {
                Self::new(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message)
            }
            DomainError::BusinessRule { message } => {
                Self::new(StatusCode::CONFLICT, error_codes::INVALID_TRANSITION, message)
            }
            DomainError::NotFound { resource } => {
                Self::not_found(error_codes::NOT_FOUND, format!("{} not found", resource))
            }
            DomainError::Forbidden { message } => {
                Self::new(StatusCode::FORBIDDEN, error_codes::ACCESS_DENIED, message)
            }
            DomainError::Conflict { message } => {
                Self::new(StatusCode::CONFLICT, error_codes::CONFLICT, message)
            }
            DomainError::Unauthorized => {
                Self::unauthorized(error_codes::UNAUTHORIZED, "Authentication required")
            }
            DomainError::ExternalService { service, message } => {
                tracing::error!(service = %service, error = %message, "External service failure");
                Self::new(
                    StatusCode::BAD_GATEWAY,
                    error_codes::EXTERNAL_SERVICE_ERROR,
                    format!("{} request failed", service),
                )
            }
            DomainError::NotConfigured { service } => {
                let code = if service == "Stripe" {
                    error_codes::STRIPE_NOT_CONFIGURED
                } else {
                    error_codes::SERVER_ERROR
                };
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    code,
                    format!("{} is not configured", service),
                )
            }
            DomainError::Database { ref message }
            | DomainError::Storage { ref message }
            | DomainError::Internal { ref message } => {
                tracing::error!(error = %message, "Request failed");
                Self::internal()
            }
            DomainError::Auth(auth) => auth.into(),
            DomainError::Token(token) => token.into(),
            DomainError::ValidationErr(validation) => validation.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        let message = error.to_string();
        match error {
            AuthError::InvalidCredentials => {
                Self::unauthorized(error_codes::INVALID_CREDENTIALS, message)
            }
            AuthError::AccountDisabled => Self::unauthorized(error_codes::ACCOUNT_DISABLED, message),
            AuthError::InvalidRefreshToken => {
                Self::unauthorized(error_codes::INVALID_REFRESH_TOKEN, message)
            }
            AuthError::EmailAlreadyExists => Self::new(
                StatusCode::BAD_REQUEST,
                error_codes::EMAIL_ALREADY_EXISTS,
                message,
            ),
            AuthError::PasswordMismatch => Self::new(
                StatusCode::BAD_REQUEST,
                error_codes::PASSWORD_MISMATCH,
                message,
            ),
            AuthError::TermsNotAccepted => Self::new(
                StatusCode::BAD_REQUEST,
                error_codes::TERMS_NOT_ACCEPTED,
                message,
            ),
            AuthError::UserNotFound => Self::not_found(error_codes::NOT_FOUND, message),
            AuthError::InsufficientPermissions | AuthError::AccessDenied => {
                Self::new(StatusCode::FORBIDDEN, error_codes::ACCESS_DENIED, message)
            }
            AuthError::TenantProfileRequired => Self::new(
                StatusCode::FORBIDDEN,
                error_codes::TENANT_NOT_FOUND,
                "Tenant profile not found for the current user",
            ),
            AuthError::TenantProfileExists => Self::new(
                StatusCode::CONFLICT,
                error_codes::TENANT_ALREADY_EXISTS,
                message,
            ),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::TokenExpired => {
                Self::unauthorized(error_codes::TOKEN_EXPIRED, "Token has expired")
            }
            TokenError::TokenGenerationFailed => {
                tracing::error!("Token generation failed");
                Self::internal()
            }
            other => Self::unauthorized(error_codes::TOKEN_INVALID, other.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        let message = error.to_string();
        match error {
            ValidationError::InvalidStatus { .. } => {
                Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_STATUS, message)
            }
            ValidationError::InvalidRating => {
                Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_RATING, message)
            }
            ValidationError::DuplicateValue { .. } => {
                Self::new(StatusCode::CONFLICT, error_codes::CONFLICT, message)
            }
            _ => Self::new(StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, message),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: serde_json::Map<String, serde_json::Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), serde_json::json!(messages))
            })
            .collect();

        let mut error = Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::VALIDATION_ERROR,
            "Validation failed",
        );
        error.details = Some(serde_json::Value::Object(fields));
        error
    }
}

/// JSON body errors answer with the standard error body
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            tracing::debug!(error = %err, "Rejected JSON body");
            ApiError::bad_request(format!("Invalid request body: {}", err)).into()
        })
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        ApiError::bad_request(format!("Invalid path parameter: {}", err)).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        ApiError::bad_request(format!("Invalid query parameter: {}", err)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_profile_required_is_forbidden() {
        let error = ApiError::from(DomainError::Auth(AuthError::TenantProfileRequired));
        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(error.code(), "TENANT_NOT_FOUND");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let error = ApiError::from(DomainError::database("connection refused at 10.0.0.3"));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.body().message, GENERIC_MESSAGE);
    }

    #[test]
    fn test_feedback_errors_keep_codes() {
        let rating = ApiError::from(DomainError::from(ValidationError::InvalidRating));
        assert_eq!(rating.code(), "INVALID_RATING");

        let status = ApiError::from(DomainError::from(ValidationError::InvalidStatus {
            message: "Can only provide feedback on completed requests".to_string(),
        }));
        assert_eq!(status.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(status.code(), "INVALID_STATUS");
    }

    #[test]
    fn test_stripe_not_configured() {
        let error = ApiError::from(DomainError::NotConfigured {
            service: "Stripe".to_string(),
        });
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.code(), "STRIPE_NOT_CONFIGURED");
    }

    #[test]
    fn test_expired_token() {
        let error = ApiError::from(DomainError::Token(TokenError::TokenExpired));
        assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(error.code(), "TOKEN_EXPIRED");
    }
}

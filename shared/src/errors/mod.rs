//! JSON error body and the codes clients branch on

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error body returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Always `true`; lets clients branch on `body.error`
    pub error: bool,

    pub message: String,

    /// Stable machine-readable code
    pub error_code: String,

    /// Field errors for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            error_code: error_code.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Values that fail to serialize are skipped
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Stable `errorCode` values
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const ACCESS_DENIED: &str = "ACCESS_DENIED";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const EXTERNAL_SERVICE_ERROR: &str = "EXTERNAL_SERVICE_ERROR";

    pub const TOKEN_EXPIRED: &str = "TOKEN_EXPIRED";
    pub const TOKEN_INVALID: &str = "TOKEN_INVALID";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const ACCOUNT_DISABLED: &str = "ACCOUNT_DISABLED";
    pub const INVALID_REFRESH_TOKEN: &str = "INVALID_REFRESH_TOKEN";
    pub const PASSWORD_MISMATCH: &str = "PASSWORD_MISMATCH";
    pub const TERMS_NOT_ACCEPTED: &str = "TERMS_NOT_ACCEPTED";
    pub const EMAIL_ALREADY_EXISTS: &str = "EMAIL_ALREADY_EXISTS";

    pub const TENANT_NOT_FOUND: &str = "TENANT_NOT_FOUND";
    pub const TENANT_ALREADY_EXISTS: &str = "TENANT_ALREADY_EXISTS";
    pub const INVALID_STATUS: &str = "INVALID_STATUS";
    pub const INVALID_RATING: &str = "INVALID_RATING";
    pub const INVALID_TRANSITION: &str = "INVALID_TRANSITION";
    pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
    pub const STRIPE_NOT_CONFIGURED: &str = "STRIPE_NOT_CONFIGURED";
}

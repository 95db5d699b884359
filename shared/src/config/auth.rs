//! Token signing and password hashing settings

use serde::{Deserialize, Serialize};

const DEFAULT_SECRET: &str = "nbj-development-secret-change-me-in-production-environments-please";
const DAY: i64 = 86_400;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// HMAC key shared by every API instance
    pub secret: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// Written to `iss` and required when verifying
    pub issuer: String,

    /// HS256, HS384 or HS512
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            access_token_expiry: DAY,
            refresh_token_expiry: 7 * DAY,
            issuer: "nbj-tenant-management".to_string(),
            algorithm: default_algorithm(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    pub fn with_access_expiry_seconds(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * DAY;
        self
    }

    /// True while the built-in development key is in use
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

fn default_algorithm() -> String {
    "HS512".to_string()
}

fn default_bcrypt_cost() -> u32 {
    10
}

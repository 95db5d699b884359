//! Configuration for the token service

use std::str::FromStr;

use jsonwebtoken::Algorithm;
use nbj_shared::JwtConfig;

use crate::domain::entities::token::JWT_ISSUER;
use crate::errors::{DomainError, DomainResult};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Shared HMAC secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HS256, HS384 or HS512)
    pub algorithm: Algorithm,
    /// Issuer written to and required in every token
    pub issuer: String,
    /// Access token lifetime in seconds
    pub access_token_expiry_seconds: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS512,
            issuer: JWT_ISSUER.to_string(),
            access_token_expiry_seconds: 86_400,
            refresh_token_expiry_seconds: 604_800,
        }
    }
}

impl TokenServiceConfig {
    /// Build from the application JWT settings; only HMAC algorithms are
    /// accepted since the secret is shared
    pub fn from_jwt_config(config: &JwtConfig) -> DomainResult<Self> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| DomainError::Internal {
            message: format!("Unsupported JWT algorithm: {}", config.algorithm),
        })?;
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(DomainError::Internal {
                message: format!("JWT algorithm {} is not an HMAC algorithm", config.algorithm),
            });
        }

        Ok(Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            issuer: config.issuer.clone(),
            access_token_expiry_seconds: config.access_token_expiry,
            refresh_token_expiry_seconds: config.refresh_token_expiry,
        })
    }
}

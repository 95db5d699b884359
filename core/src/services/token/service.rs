//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, TokenPair, TokenType};
use crate::errors::{DomainError, DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Refresh is suggested once less than this much lifetime remains
const REFRESH_THRESHOLD_SECONDS: i64 = 300;

/// Issues and validates signed access and refresh tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn access_token_lifetime(&self) -> i64 {
        self.config.access_token_expiry_seconds
    }

    pub fn refresh_token_lifetime(&self) -> i64 {
        self.config.refresh_token_expiry_seconds
    }

    /// Issues a fresh access/refresh pair for `subject` (the user's email)
    pub fn generate_token_pair(&self, subject: &str) -> DomainResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.generate_access_token(subject)?,
            refresh_token: self.generate_refresh_token(subject)?,
            expires_in: self.config.access_token_expiry_seconds,
            refresh_expires_in: self.config.refresh_token_expiry_seconds,
        })
    }

    pub fn generate_access_token(&self, subject: &str) -> DomainResult<String> {
        self.issue(subject, TokenType::Access, self.config.access_token_expiry_seconds)
    }

    pub fn generate_refresh_token(&self, subject: &str) -> DomainResult<String> {
        self.issue(subject, TokenType::Refresh, self.config.refresh_token_expiry_seconds)
    }

    fn issue(&self, subject: &str, token_type: TokenType, lifetime: i64) -> DomainResult<String> {
        let claims = Claims::new(subject, token_type, lifetime, self.config.issuer.as_str());
        self.encode_jwt(&claims)
    }

    pub(crate) fn encode_jwt(&self, claims: &Claims) -> DomainResult<String> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Checks signature, issuer and expiry without looking at the type
    pub fn decode(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                ErrorKind::InvalidSignature => DomainError::Token(TokenError::InvalidSignature),
                ErrorKind::MissingRequiredClaim(claim) => DomainError::Token(TokenError::MissingClaim {
                    claim: claim.clone(),
                }),
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })?;
        Ok(token_data.claims)
    }

    /// Verifies a token and requires its `type` claim to be `expected`
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError::TokenExpired)` - Past its expiry
    /// * `Err(TokenError::WrongTokenType)` - A refresh token used as an
    ///   access token or the other way round
    /// * `Err(TokenError::*)` - Malformed, tampered or foreign token
    pub fn verify(&self, token: &str, expected: TokenType) -> DomainResult<Claims> {
        let claims = self.decode(token)?;
        if claims.token_type != expected {
            return Err(DomainError::Token(TokenError::WrongTokenType));
        }
        Ok(claims)
    }

    /// A new access token for the subject of a valid refresh token
    pub fn refresh_access_token(&self, refresh_token: &str) -> DomainResult<(String, Claims)> {
        let claims = self.verify(refresh_token, TokenType::Refresh)?;
        let access_token = self.generate_access_token(&claims.sub)?;
        tracing::debug!(subject = %claims.sub, "Access token refreshed");
        Ok((access_token, claims))
    }

    pub fn remaining_seconds(&self, claims: &Claims) -> i64 {
        claims.remaining_seconds()
    }

    /// True when less than five minutes of lifetime remain
    pub fn should_refresh(&self, claims: &Claims) -> bool {
        claims.remaining_seconds() < REFRESH_THRESHOLD_SECONDS
    }
}

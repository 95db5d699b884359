//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `auth` - JWT signing and token lifetimes
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration
//! - `storage` - Upload directory for maintenance attachments
//! - `stripe` - Stripe Connect credentials and onboarding URLs
//!
//! Values are layered: built-in defaults for the detected environment,
//! then `config/<environment>.toml` when present, then `APP__SECTION__KEY`
//! environment variables, then the flat variables older deployments use
//! (`DATABASE_URL`, `JWT_SECRET`, ...).

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;
pub mod storage;
pub mod stripe;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

pub use auth::JwtConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};
pub use storage::StorageConfig;
pub use stripe::StripeConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,

    /// Attachment storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Stripe Connect configuration
    #[serde(default)]
    pub stripe: StripeConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Built-in defaults for the given environment
    pub fn for_environment(environment: Environment) -> Self {
        let cors = if environment.is_production() {
            CorsConfig::default()
        } else {
            CorsConfig::development()
        };

        Self {
            environment,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            storage: StorageConfig::default(),
            stripe: StripeConfig::default(),
            cors,
            logging: LoggingConfig::for_environment(environment),
        }
    }

    /// Load the layered configuration for the current environment
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let environment = Environment::from_env();
        Self::load_for(environment)
    }

    /// Load the layered configuration for an explicit environment
    pub fn load_for(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Config::try_from(&Self::for_environment(environment))?;

        let settings = Config::builder()
            .add_source(defaults)
            .add_source(File::with_name(&environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: AppConfig = settings.try_deserialize()?;
        loaded.environment = environment;
        loaded.apply_legacy_env();
        loaded.validate().map_err(ConfigError::Message)?;

        tracing::debug!(environment = %loaded.environment, "Configuration loaded");
        Ok(loaded)
    }

    /// Apply the flat environment variables used by older deployments
    fn apply_legacy_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.jwt.secret = secret;
        }
        if let Ok(dir) = std::env::var("UPLOAD_DIR") {
            self.storage.upload_dir = dir;
        }
        if let Ok(key) = std::env::var("STRIPE_SECRET_KEY") {
            self.stripe.secret_key = key;
        }
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }

    /// Reject configurations that must never reach production
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err("JWT secret must be configured in production".to_string());
        }
        if self.jwt.access_token_expiry <= 0 || self.jwt.refresh_token_expiry <= 0 {
            return Err("Token lifetimes must be positive".to_string());
        }
        if self.jwt.refresh_token_expiry < self.jwt.access_token_expiry {
            return Err("Refresh tokens must outlive access tokens".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_defaults_are_valid() {
        let config = AppConfig::for_environment(Environment::Development);
        assert!(config.validate().is_ok());
        assert_eq!(config.jwt.algorithm, "HS512");
        assert_eq!(config.server.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig::for_environment(Environment::Production);
        assert!(config.validate().is_err());

        let mut config = config;
        config.jwt.secret = "a-real-secret-that-is-long-enough-for-hs512-signing-keys-0123456789".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_refresh_must_outlive_access() {
        let mut config = AppConfig::default();
        config.jwt.refresh_token_expiry = 10;
        config.jwt.access_token_expiry = 60;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_for_development_uses_defaults() {
        let config = AppConfig::load_for(Environment::Development).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert!(config.jwt.access_token_expiry > 0);
    }
}

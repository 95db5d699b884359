//! Shared utilities and common types for the NBJ tenant management server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and the layered loader
//! - The JSON error body returned by every endpoint
//! - Pagination request/response types

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, CorsConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig, ServerConfig,
    StorageConfig, StripeConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{Page, PageRequest, SortDirection};

//! # Infrastructure Layer
//!
//! Concrete implementations of the seams `nbj_core` defines:
//!
//! - **Database**: MySQL repositories using SQLx, the pool and migrations
//! - **Storage**: attachment bytes on the local filesystem
//! - **Stripe**: Connect account and onboarding link calls over HTTPS
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Local filesystem storage for maintenance attachments
pub mod storage;

/// Stripe Connect HTTP client
pub mod stripe;

#[cfg(feature = "mysql")]
pub use database::{
    DatabasePool, MySqlAttachmentRepository, MySqlLeaseRepository, MySqlMaintenanceRepository,
    MySqlPaymentRepository, MySqlPropertyRepository, MySqlTenantRepository, MySqlUserRepository,
    PoolStatistics,
};
pub use storage::LocalFileStorage;
pub use stripe::StripeConnectClient;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

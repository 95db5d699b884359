//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management and embedded migrations
//! - Repository implementations for every `nbj_core` repository trait

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlAttachmentRepository, MySqlLeaseRepository, MySqlMaintenanceRepository,
    MySqlPaymentRepository, MySqlPropertyRepository, MySqlTenantRepository, MySqlUserRepository,
};

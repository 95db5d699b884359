//! Maintenance request workflow

mod service;

#[cfg(test)]
mod tests;

pub use service::{MaintenanceDetails, MaintenanceService, NewMaintenanceRequest};

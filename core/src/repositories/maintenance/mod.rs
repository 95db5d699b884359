pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockMaintenanceRepository;
pub use r#trait::MaintenanceRepository;
pub use r#trait::MaintenanceFilter;

#[cfg(test)]
mod tests;

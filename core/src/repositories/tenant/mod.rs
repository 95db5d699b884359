pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockTenantRepository;
pub use r#trait::TenantRepository;

#[cfg(test)]
mod tests;

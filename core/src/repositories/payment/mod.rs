pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;
pub mod mock;

pub use mock::MockPaymentRepository;
pub use r#trait::PaymentRepository;
pub use r#trait::PaymentFilter;

//! Repository interfaces plus in-memory implementations.
//!
//! The `Mock*Repository` types keep everything in a
//! `tokio::sync::RwLock<HashMap<..>>` and are what the service and HTTP tests
//! run against; the MySQL implementations live in `nbj_infra`.

pub mod attachment;
pub mod lease;
pub mod maintenance;
pub mod payment;
pub mod property;
pub mod tenant;
pub mod user;

pub use attachment::{AttachmentRepository, MockAttachmentRepository};
pub use lease::{LeaseRepository, MockLeaseRepository};
pub use maintenance::{MaintenanceFilter, MaintenanceRepository, MockMaintenanceRepository};
pub use payment::{MockPaymentRepository, PaymentFilter, PaymentRepository};
pub use property::{MockPropertyRepository, PropertyRepository};
pub use tenant::{MockTenantRepository, TenantRepository};
pub use user::{MockUserRepository, UserRepository};

use std::cmp::Ordering;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};

use nbj_shared::SortDirection;

/// Identity generator shared by the in-memory repositories
#[derive(Debug)]
pub(crate) struct IdSequence(AtomicI64);

impl IdSequence {
    pub(crate) fn new() -> Self {
        Self(AtomicI64::new(1))
    }

    pub(crate) fn next(&self) -> i64 {
        self.0.fetch_add(1, AtomicOrdering::SeqCst)
    }
}

/// Applies a sort direction to an ascending comparison
pub(crate) fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

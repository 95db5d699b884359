//! Payment repository trait

use async_trait::async_trait;
use chrono::NaiveDate;
use nbj_shared::{Page, PageRequest};

use crate::domain::entities::payment::{Payment, PaymentStatus};
use crate::errors::DomainError;

/// Criteria for the payment history search
///
/// `tenant_ids = Some(vec![])` matches nothing; `None` means any tenant.
/// The date range applies to the payment date and is inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    pub tenant_ids: Option<Vec<i64>>,
    pub status: Option<PaymentStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl PaymentFilter {
    pub fn matches(&self, payment: &Payment) -> bool {
        if let Some(ids) = &self.tenant_ids {
            if !ids.contains(&payment.tenant_id) {
                return false;
            }
        }
        if let Some(status) = self.status {
            if payment.status != status {
                return false;
            }
        }
        if let Some(start) = self.start_date {
            if payment.payment_date.map_or(true, |d| d < start) {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if payment.payment_date.map_or(true, |d| d > end) {
                return false;
            }
        }
        true
    }
}

/// Persistence for payments
///
/// Sort fields: `id`, `amount`, `totalAmount`, `dueDate`, `paymentDate`,
/// `status`, `createdAt`; unknown fields sort by `paymentDate`.
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Payment>, DomainError>;

    async fn search(
        &self,
        filter: &PaymentFilter,
        page: &PageRequest,
    ) -> Result<Page<Payment>, DomainError>;

    /// Payments of one tenant, latest due date first
    async fn find_by_tenant(&self, tenant_id: i64) -> Result<Vec<Payment>, DomainError>;

    async fn create(&self, payment: Payment) -> Result<Payment, DomainError>;

    async fn update(&self, payment: Payment) -> Result<Payment, DomainError>;
}

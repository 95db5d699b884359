//! In-memory implementation of PaymentRepository

use async_trait::async_trait;
use nbj_shared::{Page, PageRequest};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::payment::Payment;
use crate::errors::DomainError;
use crate::repositories::{directed, IdSequence};

use super::trait_::{PaymentFilter, PaymentRepository};

/// In-memory payment repository
pub struct MockPaymentRepository {
    payments: Arc<RwLock<HashMap<i64, Payment>>>,
    ids: IdSequence,
}

impl MockPaymentRepository {
    pub fn new() -> Self {
        Self {
            payments: Arc::new(RwLock::new(HashMap::new())),
            ids: IdSequence::new(),
        }
    }
}

impl Default for MockPaymentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentRepository for MockPaymentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Payment>, DomainError> {
        Ok(self.payments.read().await.get(&id).cloned())
    }

    async fn search(
        &self,
        filter: &PaymentFilter,
        page: &PageRequest,
    ) -> Result<Page<Payment>, DomainError> {
        let mut found: Vec<Payment> = self
            .payments
            .read()
            .await
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            let ordering = match page.sort_by.as_str() {
                "id" => a.id.cmp(&b.id),
                "amount" => a.amount.cmp(&b.amount),
                "totalAmount" => a.total_amount.cmp(&b.total_amount),
                "dueDate" => a.due_date.cmp(&b.due_date),
                "status" => a.status.as_str().cmp(b.status.as_str()),
                "createdAt" => a.created_at.cmp(&b.created_at),
                _ => a.payment_date.cmp(&b.payment_date),
            };
            directed(ordering.then(a.id.cmp(&b.id)), page.sort_dir)
        });
        Ok(Page::from_vec(found, page))
    }

    async fn find_by_tenant(&self, tenant_id: i64) -> Result<Vec<Payment>, DomainError> {
        let mut found: Vec<Payment> = self
            .payments
            .read()
            .await
            .values()
            .filter(|p| p.tenant_id == tenant_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.due_date.cmp(&a.due_date).then(b.id.cmp(&a.id)));
        Ok(found)
    }

    async fn create(&self, mut payment: Payment) -> Result<Payment, DomainError> {
        payment.id = self.ids.next();
        self.payments
            .write()
            .await
            .insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn update(&self, payment: Payment) -> Result<Payment, DomainError> {
        let mut payments = self.payments.write().await;
        if !payments.contains_key(&payment.id) {
            return Err(DomainError::not_found("Payment"));
        }
        payments.insert(payment.id, payment.clone());
        Ok(payment)
    }
}

//! Payment records and the admin payment history search

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use nbj_shared::{Page, PageRequest};

use crate::domain::entities::payment::{Payment, PaymentMethod, PaymentStatus, PaymentType};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{PaymentFilter, PaymentRepository, TenantRepository, UserRepository};

/// History search; every criterion is optional
#[derive(Debug, Clone, Default)]
pub struct PaymentHistoryQuery {
    /// Case-insensitive substring of the tenant's first or last name
    pub tenant_name: Option<String>,
    pub status: Option<PaymentStatus>,
    /// Inclusive bounds on the payment date
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: PageRequest,
}

/// A payment with the tenant fields the history view shows
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentHistoryEntry {
    pub payment: Payment,
    pub tenant_name: Option<String>,
    pub property_address: Option<String>,
    pub unit_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewPayment {
    pub tenant_id: i64,
    pub lease_agreement_id: Option<i64>,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    pub payment_type: PaymentType,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub notes: Option<String>,
}

pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    tenants: Arc<dyn TenantRepository>,
    users: Arc<dyn UserRepository>,
}

impl PaymentService {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        tenants: Arc<dyn TenantRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            payments,
            tenants,
            users,
        }
    }

    /// Filtered, paged payment history
    ///
    /// A name filter is resolved to tenant ids first; when nobody matches
    /// the result is an empty page rather than an unfiltered one.
    pub async fn history(&self, query: PaymentHistoryQuery) -> DomainResult<Page<PaymentHistoryEntry>> {
        if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
            if start > end {
                return Err(DomainError::validation("startDate must not be after endDate"));
            }
        }

        let tenant_ids = match query.tenant_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                let users = self.users.search_by_name(name).await?;
                let user_ids: Vec<i64> = users.iter().map(|u| u.id).collect();
                let tenants = self.tenants.find_by_user_ids(&user_ids).await?;
                Some(tenants.into_iter().map(|t| t.id).collect())
            }
            _ => None,
        };

        let filter = PaymentFilter {
            tenant_ids,
            status: query.status,
            start_date: query.start_date,
            end_date: query.end_date,
        };
        let payments = self.payments.search(&filter, &query.page).await?;

        let mut names: HashMap<i64, (Option<String>, Option<String>, Option<String>)> = HashMap::new();
        let mut items = Vec::with_capacity(payments.items.len());
        for payment in payments.items {
            if !names.contains_key(&payment.tenant_id) {
                let info = self.tenant_info(payment.tenant_id).await?;
                names.insert(payment.tenant_id, info);
            }
            let (tenant_name, property_address, unit_number) =
                names.get(&payment.tenant_id).cloned().unwrap_or_default();
            items.push(PaymentHistoryEntry {
                payment,
                tenant_name,
                property_address,
                unit_number,
            });
        }

        Ok(Page {
            items,
            page: payments.page,
            size: payments.size,
            total_items: payments.total_items,
            total_pages: payments.total_pages,
        })
    }

    pub async fn create(&self, input: NewPayment) -> DomainResult<Payment> {
        if input.amount <= Decimal::ZERO {
            return Err(DomainError::validation("amount must be positive"));
        }
        if !self.tenants.exists(input.tenant_id).await? {
            return Err(DomainError::not_found(format!("Tenant {}", input.tenant_id)));
        }

        let mut payment = Payment::new(input.tenant_id, input.amount, input.due_date, input.payment_type);
        payment.lease_agreement_id = input.lease_agreement_id;
        payment.payment_period_start = input.period_start;
        payment.payment_period_end = input.period_end;
        payment.notes = input.notes;

        let payment = self.payments.create(payment).await?;
        tracing::info!(payment_id = payment.id, tenant_id = payment.tenant_id, "Payment recorded");
        Ok(payment)
    }

    pub async fn get(&self, id: i64) -> DomainResult<Payment> {
        self.find(id).await
    }

    pub async fn mark_paid(
        &self,
        id: i64,
        method: PaymentMethod,
        transaction_id: Option<String>,
        processed_by: &str,
    ) -> DomainResult<Payment> {
        let mut payment = self.find(id).await?;
        payment.mark_as_paid(method, transaction_id, processed_by)?;
        let payment = self.payments.update(payment).await?;
        tracing::info!(payment_id = payment.id, method = %method, "Payment marked as paid");
        Ok(payment)
    }

    /// Charges the late fee due at `rate` after `grace_period_days`
    pub async fn apply_late_fee(
        &self,
        id: i64,
        rate: Decimal,
        grace_period_days: i64,
    ) -> DomainResult<Payment> {
        let mut payment = self.find(id).await?;
        if !payment.can_be_modified() {
            return Err(DomainError::business_rule(format!(
                "Payment in status {} cannot be modified",
                payment.status
            )));
        }
        let fee = payment.calculate_late_fee(rate, grace_period_days)?;
        payment.apply_late_fee(fee);
        self.payments.update(payment).await
    }

    async fn find(&self, id: i64) -> DomainResult<Payment> {
        self.payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Payment {}", id)))
    }

    async fn tenant_info(
        &self,
        tenant_id: i64,
    ) -> DomainResult<(Option<String>, Option<String>, Option<String>)> {
        let Some(tenant) = self.tenants.find_by_id(tenant_id).await? else {
            return Ok((None, None, None));
        };
        let name = self
            .users
            .find_by_id(tenant.user_id)
            .await?
            .map(|u| u.full_name());
        Ok((name, Some(tenant.property_address), tenant.unit_number))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::tenant::Tenant;
    use crate::domain::entities::user::{Role, User};
    use crate::repositories::{MockPaymentRepository, MockTenantRepository, MockUserRepository};
    use chrono::Utc;

    struct Fixture {
        service: PaymentService,
        alice_tenant: i64,
        bob_tenant: i64,
    }

    async fn fixture() -> Fixture {
        let users = Arc::new(MockUserRepository::new());
        let tenants = Arc::new(MockTenantRepository::new());
        let payments = Arc::new(MockPaymentRepository::new());

        let alice = users
            .create(User::new("alice@example.com", "h", "Alice", "Smith", Role::Tenant))
            .await
            .unwrap();
        let bob = users
            .create(User::new("bob@example.com", "h", "Bob", "Jones", Role::Tenant))
            .await
            .unwrap();
        let alice_tenant = tenants.create(Tenant::new(alice.id, "1 A St")).await.unwrap().id;
        let bob_tenant = tenants.create(Tenant::new(bob.id, "2 B St")).await.unwrap().id;

        Fixture {
            service: PaymentService::new(payments, tenants, users),
            alice_tenant,
            bob_tenant,
        }
    }

    fn rent(tenant_id: i64) -> NewPayment {
        NewPayment {
            tenant_id,
            lease_agreement_id: None,
            amount: Decimal::new(100_000, 2),
            due_date: Utc::now().date_naive(),
            payment_type: PaymentType::Rent,
            period_start: None,
            period_end: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_history_filters_by_tenant_name() {
        let fx = fixture().await;
        let a = fx.service.create(rent(fx.alice_tenant)).await.unwrap();
        fx.service.create(rent(fx.bob_tenant)).await.unwrap();

        let page = fx
            .service
            .history(PaymentHistoryQuery {
                tenant_name: Some("smi".to_string()),
                ..PaymentHistoryQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].payment.id, a.id);
        assert_eq!(page.items[0].tenant_name.as_deref(), Some("Alice Smith"));
        assert_eq!(page.items[0].property_address.as_deref(), Some("1 A St"));
    }

    #[tokio::test]
    async fn test_unknown_name_matches_nothing() {
        let fx = fixture().await;
        fx.service.create(rent(fx.alice_tenant)).await.unwrap();
        let page = fx
            .service
            .history(PaymentHistoryQuery {
                tenant_name: Some("zzz".to_string()),
                ..PaymentHistoryQuery::default()
            })
            .await
            .unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_items, 0);
    }

    #[tokio::test]
    async fn test_status_and_date_filters() {
        let fx = fixture().await;
        let paid = fx.service.create(rent(fx.alice_tenant)).await.unwrap();
        fx.service.create(rent(fx.bob_tenant)).await.unwrap();
        fx.service
            .mark_paid(paid.id, PaymentMethod::BankTransfer, Some("tx-1".to_string()), "admin@example.com")
            .await
            .unwrap();

        let today = Utc::now().date_naive();
        let page = fx
            .service
            .history(PaymentHistoryQuery {
                status: Some(PaymentStatus::Completed),
                start_date: Some(today),
                end_date: Some(today),
                ..PaymentHistoryQuery::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].payment.transaction_id.as_deref(), Some("tx-1"));
    }

    #[tokio::test]
    async fn test_inverted_date_range_rejected() {
        let fx = fixture().await;
        let today = Utc::now().date_naive();
        let err = fx
            .service
            .history(PaymentHistoryQuery {
                start_date: Some(today),
                end_date: Some(today - chrono::Duration::days(1)),
                ..PaymentHistoryQuery::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_paid_payment_cannot_be_paid_again() {
        let fx = fixture().await;
        let payment = fx.service.create(rent(fx.alice_tenant)).await.unwrap();
        fx.service
            .mark_paid(payment.id, PaymentMethod::Cash, None, "admin")
            .await
            .unwrap();
        let err = fx
            .service
            .mark_paid(payment.id, PaymentMethod::Cash, None, "admin")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BusinessRule { .. }));
    }

    #[tokio::test]
    async fn test_create_requires_tenant_and_positive_amount() {
        let fx = fixture().await;
        assert!(matches!(fx.service.create(rent(999)).await, Err(DomainError::NotFound { .. })));
        let zero = NewPayment {
            amount: Decimal::ZERO,
            ..rent(fx.alice_tenant)
        };
        assert!(fx.service.create(zero).await.is_err());
    }
}

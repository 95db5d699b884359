//! Lease agreement lifecycle: drafting, signatures, activation, expiry

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::lease::{LeaseAgreement, LeaseStatus};
use crate::domain::value_objects::AuthenticatedUser;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{LeaseRepository, TenantRepository};

#[derive(Debug, Clone)]
pub struct NewLease {
    pub tenant_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: Decimal,
    pub security_deposit: Option<Decimal>,
    pub lease_terms: Option<String>,
    pub special_conditions: Option<String>,
    /// Set when this lease renews an earlier one
    pub previous_lease_id: Option<i64>,
}

pub struct LeaseService {
    leases: Arc<dyn LeaseRepository>,
    tenants: Arc<dyn TenantRepository>,
}

impl LeaseService {
    pub fn new(leases: Arc<dyn LeaseRepository>, tenants: Arc<dyn TenantRepository>) -> Self {
        Self { leases, tenants }
    }

    /// Drafts a lease for an existing tenant
    pub async fn create(&self, input: NewLease) -> DomainResult<LeaseAgreement> {
        if input.end_date <= input.start_date {
            return Err(DomainError::validation("endDate must be after startDate"));
        }
        if input.monthly_rent <= Decimal::ZERO {
            return Err(DomainError::validation("monthlyRent must be positive"));
        }
        if !self.tenants.exists(input.tenant_id).await? {
            return Err(DomainError::not_found(format!("Tenant {}", input.tenant_id)));
        }

        let mut lease = LeaseAgreement::new(
            input.tenant_id,
            input.start_date,
            input.end_date,
            input.monthly_rent,
        );
        lease.security_deposit = input.security_deposit;
        lease.lease_terms = input.lease_terms;
        lease.special_conditions = input.special_conditions;

        if let Some(previous_id) = input.previous_lease_id {
            let previous = self.find(previous_id).await?;
            if previous.tenant_id != input.tenant_id {
                return Err(DomainError::business_rule(
                    "A renewal must belong to the same tenant as the lease it renews",
                ));
            }
            lease.mark_as_renewal(previous_id);
        }

        let lease = self.leases.create(lease).await?;
        tracing::info!(lease_id = lease.id, tenant_id = lease.tenant_id, "Lease drafted");
        Ok(lease)
    }

    pub async fn get(&self, id: i64) -> DomainResult<LeaseAgreement> {
        self.find(id).await
    }

    pub async fn list_for_tenant(&self, tenant_id: i64) -> DomainResult<Vec<LeaseAgreement>> {
        self.leases.find_by_tenant(tenant_id).await
    }

    /// Leases of the tenant profile owned by `user_id`
    pub async fn list_for_user(&self, user_id: i64) -> DomainResult<Vec<LeaseAgreement>> {
        let tenant = self
            .tenants
            .find_by_user_id(user_id)
            .await?
            .ok_or(AuthError::TenantProfileRequired)?;
        self.leases.find_by_tenant(tenant.id).await
    }

    pub async fn list_by_status(
        &self,
        status: Option<LeaseStatus>,
    ) -> DomainResult<Vec<LeaseAgreement>> {
        self.leases.find_by_status(status).await
    }

    pub async fn submit_for_signature(&self, id: i64) -> DomainResult<LeaseAgreement> {
        let mut lease = self.find(id).await?;
        lease.submit_for_signature()?;
        self.leases.update(lease).await
    }

    /// Signs as the caller's role; tenants may only sign their own lease
    pub async fn sign(&self, id: i64, signer: &AuthenticatedUser) -> DomainResult<LeaseAgreement> {
        let mut lease = self.find(id).await?;

        if signer.is_admin() {
            lease.sign_by_admin()?;
        } else {
            let tenant = self
                .tenants
                .find_by_user_id(signer.user_id)
                .await?
                .ok_or(AuthError::TenantProfileRequired)?;
            if tenant.id != lease.tenant_id {
                tracing::warn!(lease_id = id, user_id = signer.user_id, "Signature on foreign lease refused");
                return Err(AuthError::AccessDenied.into());
            }
            lease.sign_by_tenant()?;
        }

        let lease = self.leases.update(lease).await?;
        tracing::info!(lease_id = lease.id, status = %lease.status, "Lease signed");
        Ok(lease)
    }

    pub async fn activate(&self, id: i64) -> DomainResult<LeaseAgreement> {
        let mut lease = self.find(id).await?;
        lease.activate()?;
        let lease = self.leases.update(lease).await?;
        tracing::info!(lease_id = lease.id, "Lease activated");
        Ok(lease)
    }

    /// Active leases ending between today and `days` from now
    pub async fn expiring_within(&self, days: i64) -> DomainResult<Vec<LeaseAgreement>> {
        if days < 0 {
            return Err(DomainError::validation("days must not be negative"));
        }
        let today = Utc::now().date_naive();
        let until = Duration::try_days(days)
            .and_then(|window| today.checked_add_signed(window))
            .ok_or_else(|| DomainError::validation("days is out of range"))?;
        self.leases.find_expiring(today, until).await
    }

    /// Flags the renewal notice as sent
    pub async fn send_renewal_notice(&self, id: i64) -> DomainResult<LeaseAgreement> {
        let mut lease = self.find(id).await?;
        lease.send_renewal_notice();
        self.leases.update(lease).await
    }

    async fn find(&self, id: i64) -> DomainResult<LeaseAgreement> {
        self.leases
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Lease {}", id)))
    }
}

//! Lease agreement between a tenant and the property manager.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaseStatus {
    Draft,
    PendingSignature,
    Signed,
    Active,
    Expired,
    Terminated,
    Cancelled,
}

text_enum!(LeaseStatus {
    Draft => "DRAFT",
    PendingSignature => "PENDING_SIGNATURE",
    Signed => "SIGNED",
    Active => "ACTIVE",
    Expired => "EXPIRED",
    Terminated => "TERMINATED",
    Cancelled => "CANCELLED",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseAgreement {
    pub id: i64,
    pub tenant_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: Decimal,
    pub security_deposit: Option<Decimal>,
    pub status: LeaseStatus,
    pub lease_document_path: Option<String>,
    pub lease_document_name: Option<String>,
    pub signed_document_path: Option<String>,
    pub signed_document_name: Option<String>,
    pub is_renewal: bool,
    pub previous_lease_id: Option<i64>,
    pub renewal_notice_sent: bool,
    pub renewal_notice_date: Option<NaiveDate>,
    pub tenant_signed_date: Option<NaiveDate>,
    pub admin_signed_date: Option<NaiveDate>,
    pub lease_terms: Option<String>,
    pub special_conditions: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeaseAgreement {
    /// Creates a draft lease
    pub fn new(
        tenant_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
        monthly_rent: Decimal,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            tenant_id,
            start_date,
            end_date,
            monthly_rent,
            security_deposit: None,
            status: LeaseStatus::Draft,
            lease_document_path: None,
            lease_document_name: None,
            signed_document_path: None,
            signed_document_name: None,
            is_renewal: false,
            previous_lease_id: None,
            renewal_notice_sent: false,
            renewal_notice_date: None,
            tenant_signed_date: None,
            admin_signed_date: None,
            lease_terms: None,
            special_conditions: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// ACTIVE and today falls inside the lease period (inclusive)
    pub fn is_active(&self) -> bool {
        let today = Self::today();
        self.status == LeaseStatus::Active && self.start_date <= today && today <= self.end_date
    }

    pub fn is_expired(&self) -> bool {
        Self::today() > self.end_date
    }

    pub fn is_expiring_soon(&self, days: i64) -> bool {
        self.end_date <= Self::today() + Duration::days(days)
    }

    pub fn days_until_expiration(&self) -> i64 {
        (self.end_date - Self::today()).num_days()
    }

    pub fn is_fully_signed(&self) -> bool {
        self.tenant_signed_date.is_some() && self.admin_signed_date.is_some()
    }

    pub fn can_be_activated(&self) -> bool {
        self.status == LeaseStatus::Signed && self.is_fully_signed() && !self.is_expired()
    }

    /// DRAFT → PENDING_SIGNATURE
    pub fn submit_for_signature(&mut self) -> DomainResult<()> {
        if self.status != LeaseStatus::Draft {
            return Err(DomainError::business_rule(format!(
                "Only draft leases can be sent for signature (current status: {})",
                self.status
            )));
        }
        self.status = LeaseStatus::PendingSignature;
        self.updated_at = Utc::now();
        Ok(())
    }

    fn ensure_signable(&self) -> DomainResult<()> {
        match self.status {
            LeaseStatus::Draft | LeaseStatus::PendingSignature | LeaseStatus::Signed => Ok(()),
            other => Err(DomainError::business_rule(format!(
                "Lease cannot be signed in status {}",
                other
            ))),
        }
    }

    /// Records the tenant signature; the lease becomes SIGNED once the admin
    /// has signed as well
    pub fn sign_by_tenant(&mut self) -> DomainResult<()> {
        self.ensure_signable()?;
        self.tenant_signed_date = Some(Self::today());
        self.promote_if_fully_signed();
        Ok(())
    }

    /// Records the admin signature; the lease becomes SIGNED once the tenant
    /// has signed as well
    pub fn sign_by_admin(&mut self) -> DomainResult<()> {
        self.ensure_signable()?;
        self.admin_signed_date = Some(Self::today());
        self.promote_if_fully_signed();
        Ok(())
    }

    fn promote_if_fully_signed(&mut self) {
        if self.is_fully_signed() {
            self.status = LeaseStatus::Signed;
        }
        self.updated_at = Utc::now();
    }

    /// SIGNED → ACTIVE
    pub fn activate(&mut self) -> DomainResult<()> {
        if !self.can_be_activated() {
            return Err(DomainError::business_rule(
                "Lease must be fully signed and not expired before activation",
            ));
        }
        self.status = LeaseStatus::Active;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn mark_as_renewal(&mut self, previous_lease_id: i64) {
        self.is_renewal = true;
        self.previous_lease_id = Some(previous_lease_id);
        self.updated_at = Utc::now();
    }

    pub fn send_renewal_notice(&mut self) {
        self.renewal_notice_sent = true;
        self.renewal_notice_date = Some(Self::today());
        self.updated_at = Utc::now();
    }
}

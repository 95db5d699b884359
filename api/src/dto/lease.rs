use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use nbj_core::entities::{LeaseAgreement, LeaseStatus};
use nbj_core::services::NewLease;

use super::maintenance::parse_optional;
use crate::handlers::ApiError;

const DEFAULT_EXPIRY_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeaseRequest {
    #[validate(range(min = 1))]
    pub tenant_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: Decimal,
    pub security_deposit: Option<Decimal>,
    pub lease_terms: Option<String>,
    #[validate(length(max = 2000))]
    pub special_conditions: Option<String>,
    pub previous_lease_id: Option<i64>,
}

impl From<CreateLeaseRequest> for NewLease {
    fn from(request: CreateLeaseRequest) -> Self {
        Self {
            tenant_id: request.tenant_id,
            start_date: request.start_date,
            end_date: request.end_date,
            monthly_rent: request.monthly_rent,
            security_deposit: request.security_deposit,
            lease_terms: request.lease_terms,
            special_conditions: request.special_conditions,
            previous_lease_id: request.previous_lease_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaseListQuery {
    pub status: Option<String>,
}

impl LeaseListQuery {
    pub fn status(&self) -> Result<Option<LeaseStatus>, ApiError> {
        parse_optional::<LeaseStatus>(self.status.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ExpiringQuery {
    #[validate(range(min = 0, max = 3650))]
    pub days: Option<i64>,
}

impl ExpiringQuery {
    pub fn days(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_EXPIRY_WINDOW_DAYS)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseDto {
    pub id: i64,
    pub tenant_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub monthly_rent: Decimal,
    pub security_deposit: Option<Decimal>,
    pub status: String,
    pub is_renewal: bool,
    pub previous_lease_id: Option<i64>,
    pub renewal_notice_sent: bool,
    pub renewal_notice_date: Option<NaiveDate>,
    pub tenant_signed_date: Option<NaiveDate>,
    pub admin_signed_date: Option<NaiveDate>,
    pub days_until_expiration: i64,
    pub lease_terms: Option<String>,
    pub special_conditions: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LeaseAgreement> for LeaseDto {
    fn from(lease: LeaseAgreement) -> Self {
        Self {
            days_until_expiration: lease.days_until_expiration(),
            id: lease.id,
            tenant_id: lease.tenant_id,
            start_date: lease.start_date,
            end_date: lease.end_date,
            monthly_rent: lease.monthly_rent,
            security_deposit: lease.security_deposit,
            status: lease.status.to_string(),
            is_renewal: lease.is_renewal,
            previous_lease_id: lease.previous_lease_id,
            renewal_notice_sent: lease.renewal_notice_sent,
            renewal_notice_date: lease.renewal_notice_date,
            tenant_signed_date: lease.tenant_signed_date,
            admin_signed_date: lease.admin_signed_date,
            lease_terms: lease.lease_terms,
            special_conditions: lease.special_conditions,
            created_at: lease.created_at,
            updated_at: lease.updated_at,
        }
    }
}

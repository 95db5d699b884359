//! Tenant profile attached one-to-one to a tenant user account.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Occupancy status of a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantStatus {
    Active,
    Inactive,
    Pending,
    Terminated,
    Suspended,
}

text_enum!(TenantStatus {
    Active => "ACTIVE",
    Inactive => "INACTIVE",
    Pending => "PENDING",
    Terminated => "TERMINATED",
    Suspended => "SUSPENDED",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: i64,

    /// Owning user account; unique
    pub user_id: i64,

    /// Managed property the tenant lives in, when known
    pub property_id: Option<i64>,

    pub property_address: String,
    pub unit_number: Option<String>,
    pub rent_amount: Option<Decimal>,
    pub security_deposit: Option<Decimal>,
    pub lease_start_date: Option<NaiveDate>,
    pub lease_end_date: Option<NaiveDate>,
    pub status: TenantStatus,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub emergency_contact_relationship: Option<String>,
    pub move_in_date: Option<NaiveDate>,
    pub move_out_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    /// Creates an active tenant profile for `user_id`
    pub fn new(user_id: i64, property_address: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            user_id,
            property_id: None,
            property_address: property_address.into(),
            unit_number: None,
            rent_amount: None,
            security_deposit: None,
            lease_start_date: None,
            lease_end_date: None,
            status: TenantStatus::Active,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            emergency_contact_relationship: None,
            move_in_date: None,
            move_out_date: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_unit(mut self, unit_number: Option<String>) -> Self {
        self.unit_number = unit_number.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn with_status(mut self, status: TenantStatus) -> Self {
        self.status = status;
        self
    }

    /// "address, Unit n", or just the address when there is no unit
    pub fn full_address(&self) -> String {
        match self.unit_number.as_deref().map(str::trim) {
            Some(unit) if !unit.is_empty() => format!("{}, Unit {}", self.property_address, unit),
            _ => self.property_address.clone(),
        }
    }

    /// True when the lease ends within `days` days (or already ended)
    pub fn is_lease_expiring_soon(&self, days: i64) -> bool {
        let threshold = Utc::now().date_naive() + Duration::days(days);
        self.lease_end_date.map_or(false, |end| end <= threshold)
    }

    pub fn is_active(&self) -> bool {
        self.status == TenantStatus::Active
    }

    pub fn activate(&mut self) {
        self.status = TenantStatus::Active;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) {
        self.status = TenantStatus::Inactive;
        self.updated_at = Utc::now();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

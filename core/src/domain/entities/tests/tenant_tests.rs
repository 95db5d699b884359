//! Unit tests for tenant entity

use chrono::{Duration, Utc};

use crate::domain::entities::tenant::{Tenant, TenantStatus};

#[test]
fn test_full_address_with_and_without_unit() {
    let tenant = Tenant::new(7, "12 Harbour St");
    assert_eq!(tenant.full_address(), "12 Harbour St");

    let tenant = tenant.with_unit(Some("4B".to_string()));
    assert_eq!(tenant.full_address(), "12 Harbour St, Unit 4B");

    let tenant = Tenant::new(7, "12 Harbour St").with_unit(Some("  ".to_string()));
    assert_eq!(tenant.unit_number, None);
}

#[test]
fn test_lease_expiring_soon() {
    let mut tenant = Tenant::new(1, "1 Main Rd");
    assert!(!tenant.is_lease_expiring_soon(30));

    tenant.lease_end_date = Some(Utc::now().date_naive() + Duration::days(10));
    assert!(tenant.is_lease_expiring_soon(30));
    assert!(!tenant.is_lease_expiring_soon(5));
}

#[test]
fn test_status_parsing_is_case_insensitive() {
    assert_eq!("pending".parse::<TenantStatus>(), Ok(TenantStatus::Pending));
    assert_eq!("Suspended".parse::<TenantStatus>(), Ok(TenantStatus::Suspended));
    assert!("gone".parse::<TenantStatus>().is_err());
}

#[test]
fn test_activate_deactivate() {
    let mut tenant = Tenant::new(1, "1 Main Rd").with_status(TenantStatus::Pending);
    assert!(!tenant.is_active());
    tenant.activate();
    assert!(tenant.is_active());
    tenant.deactivate();
    assert_eq!(tenant.status, TenantStatus::Inactive);
}

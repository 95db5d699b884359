//! Unit tests for lease agreement signing

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::lease::{LeaseAgreement, LeaseStatus};

fn one_year_lease() -> LeaseAgreement {
    let today = Utc::now().date_naive();
    LeaseAgreement::new(5, today, today + Duration::days(365), Decimal::new(150000, 2))
}

#[test]
fn test_signed_only_when_both_parties_sign() {
    let mut lease = one_year_lease();
    lease.submit_for_signature().unwrap();
    assert_eq!(lease.status, LeaseStatus::PendingSignature);

    lease.sign_by_tenant().unwrap();
    assert_eq!(lease.status, LeaseStatus::PendingSignature);
    assert!(!lease.is_fully_signed());

    lease.sign_by_admin().unwrap();
    assert_eq!(lease.status, LeaseStatus::Signed);
    assert!(lease.is_fully_signed());
}

#[test]
fn test_activation_requires_signatures() {
    let mut lease = one_year_lease();
    assert!(!lease.can_be_activated());
    assert!(lease.activate().is_err());

    lease.sign_by_admin().unwrap();
    lease.sign_by_tenant().unwrap();
    lease.activate().unwrap();
    assert_eq!(lease.status, LeaseStatus::Active);
    assert!(lease.is_active());
}

#[test]
fn test_cannot_sign_terminated_lease() {
    let mut lease = one_year_lease();
    lease.status = LeaseStatus::Terminated;
    assert!(lease.sign_by_tenant().is_err());
    assert!(lease.tenant_signed_date.is_none());
}

#[test]
fn test_submit_only_from_draft() {
    let mut lease = one_year_lease();
    lease.status = LeaseStatus::Active;
    assert!(lease.submit_for_signature().is_err());
}

#[test]
fn test_expiry_helpers() {
    let mut lease = one_year_lease();
    assert!(!lease.is_expired());
    assert!(!lease.is_expiring_soon(30));
    assert!(lease.is_expiring_soon(400));

    lease.end_date = Utc::now().date_naive() - Duration::days(1);
    assert!(lease.is_expired());
    assert!(lease.days_until_expiration() < 0);
}

#[test]
fn test_renewal_bookkeeping() {
    let mut lease = one_year_lease();
    lease.mark_as_renewal(41);
    lease.send_renewal_notice();
    assert!(lease.is_renewal);
    assert_eq!(lease.previous_lease_id, Some(41));
    assert!(lease.renewal_notice_sent);
    assert!(lease.renewal_notice_date.is_some());
}

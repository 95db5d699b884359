//! Unit tests for maintenance request transitions

use chrono::{Duration, Utc};
use rust_decimal::Decimal;

use crate::domain::entities::maintenance::{
    MaintenanceCategory, MaintenancePriority, MaintenanceRequest, MaintenanceStatus, StatusUpdate,
};
use crate::errors::{DomainError, ValidationError};

fn leaking_tap() -> MaintenanceRequest {
    MaintenanceRequest::new(
        3,
        "Leaking tap",
        "Kitchen tap drips all night",
        MaintenanceCategory::Plumbing,
        MaintenancePriority::Medium,
    )
}

#[test]
fn test_new_request_is_pending() {
    let request = leaking_tap();
    assert_eq!(request.status, MaintenanceStatus::Pending);
    assert!(request.can_be_assigned());
    assert!(!request.can_be_started());
    assert!(request.tenant_available);
}

#[test]
fn test_full_workflow() {
    let mut request = leaking_tap();

    request.assign_to("Bob the Plumber").unwrap();
    assert_eq!(request.status, MaintenanceStatus::Assigned);
    assert!(request.assigned_at.is_some());

    request.start().unwrap();
    assert_eq!(request.status, MaintenanceStatus::InProgress);
    assert!(request.started_at.is_some());

    request
        .complete(Some("Replaced washer".to_string()), Some(Decimal::new(4550, 2)))
        .unwrap();
    assert_eq!(request.status, MaintenanceStatus::Completed);
    assert!(request.completed_at.is_some());
    assert_eq!(request.actual_cost, Some(Decimal::new(4550, 2)));
}

#[test]
fn test_start_requires_assignment() {
    let mut request = leaking_tap();
    let err = request.start().unwrap_err();
    assert!(matches!(err, DomainError::BusinessRule { .. }));
    assert_eq!(request.status, MaintenanceStatus::Pending);
}

#[test]
fn test_complete_requires_in_progress() {
    let mut request = leaking_tap();
    request.assign_to("Bob").unwrap();
    assert!(request.complete(None, None).is_err());
    assert_eq!(request.status, MaintenanceStatus::Assigned);
}

#[test]
fn test_cannot_reassign_once_started() {
    let mut request = leaking_tap();
    request.assign_to("Bob").unwrap();
    request.start().unwrap();
    assert!(request.assign_to("Alice").is_err());
    assert_eq!(request.assigned_to.as_deref(), Some("Bob"));
}

#[test]
fn test_cancel_from_any_status_appends_reason() {
    let mut request = leaking_tap();
    request.admin_notes = Some("Called tenant".to_string());
    request.cancel("Duplicate");
    assert_eq!(request.status, MaintenanceStatus::Cancelled);
    assert_eq!(
        request.admin_notes.as_deref(),
        Some("Called tenant\nCancelled: Duplicate")
    );
}

#[test]
fn test_feedback_rejected_unless_completed() {
    let mut request = leaking_tap();
    let err = request.add_feedback(Some("Great".to_string()), Some(5)).unwrap_err();
    assert!(matches!(
        err,
        DomainError::ValidationErr(ValidationError::InvalidStatus { .. })
    ));
    assert!(request.tenant_rating.is_none());
}

#[test]
fn test_feedback_rating_range() {
    let mut request = leaking_tap();
    request.status = MaintenanceStatus::Completed;

    let err = request.add_feedback(None, Some(6)).unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::InvalidRating)));

    request.add_feedback(Some("Fixed fast".to_string()), Some(4)).unwrap();
    assert_eq!(request.tenant_rating, Some(4));
    assert_eq!(request.tenant_feedback.as_deref(), Some("Fixed fast"));
}

#[test]
fn test_status_update_stamps_completion_once() {
    let mut request = leaking_tap();
    request.apply_status_update(StatusUpdate {
        status: Some(MaintenanceStatus::Completed),
        admin_notes: Some("Done by landlord".to_string()),
        ..Default::default()
    });
    let completed_at = request.completed_at;
    assert!(completed_at.is_some());

    request.apply_status_update(StatusUpdate {
        status: Some(MaintenanceStatus::Completed),
        ..Default::default()
    });
    assert_eq!(request.completed_at, completed_at);
}

#[test]
fn test_overdue() {
    let mut request = leaking_tap();
    assert!(!request.is_overdue());
    request.scheduled_date = Some(Utc::now() - Duration::days(1));
    assert!(request.is_overdue());
    request.status = MaintenanceStatus::Completed;
    assert!(!request.is_overdue());
}

#[test]
fn test_enum_parsing() {
    assert_eq!("plumbing".parse::<MaintenanceCategory>(), Ok(MaintenanceCategory::Plumbing));
    assert_eq!("doors_windows".parse::<MaintenanceCategory>(), Ok(MaintenanceCategory::DoorsWindows));
    assert_eq!("Urgent".parse::<MaintenancePriority>(), Ok(MaintenancePriority::Urgent));
    assert_eq!("in_progress".parse::<MaintenanceStatus>(), Ok(MaintenanceStatus::InProgress));
    assert!("roofing".parse::<MaintenanceCategory>().is_err());
}

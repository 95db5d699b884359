//! Maintenance workflow tests

use std::sync::Arc;

use rust_decimal::Decimal;

use nbj_shared::PageRequest;

use crate::domain::entities::maintenance::{
    MaintenanceCategory, MaintenancePriority, MaintenanceStatus, StatusUpdate,
};
use crate::domain::entities::tenant::Tenant;
use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::AuthenticatedUser;
use crate::errors::{AuthError, DomainError, ValidationError};
use crate::repositories::{
    MaintenanceFilter, MockAttachmentRepository, MockMaintenanceRepository, MockTenantRepository,
    MockUserRepository, TenantRepository, UserRepository,
};
use crate::services::file::{FileService, MockFileStorage};

use super::{MaintenanceService, NewMaintenanceRequest};

struct Fixture {
    service: MaintenanceService,
    storage: MockFileStorage,
    tenant_user: AuthenticatedUser,
    other_user: AuthenticatedUser,
    admin: AuthenticatedUser,
}

async fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let tenants = Arc::new(MockTenantRepository::new());
    let storage = MockFileStorage::new();
    let files = Arc::new(FileService::new(
        Arc::new(MockAttachmentRepository::new()),
        Arc::new(storage.clone()),
        1024 * 1024,
    ));

    let tenant = users
        .create(User::new("tina@example.com", "h", "Tina", "Tenant", Role::Tenant))
        .await
        .unwrap();
    let other = users
        .create(User::new("otto@example.com", "h", "Otto", "Other", Role::Tenant))
        .await
        .unwrap();
    let admin = users
        .create(User::new("admin@example.com", "h", "Ada", "Admin", Role::Admin))
        .await
        .unwrap();

    tenants.create(Tenant::new(tenant.id, "1 Pine St")).await.unwrap();
    tenants.create(Tenant::new(other.id, "2 Pine St")).await.unwrap();

    Fixture {
        service: MaintenanceService::new(
            Arc::new(MockMaintenanceRepository::new()),
            tenants,
            users,
            files,
        ),
        storage,
        tenant_user: AuthenticatedUser::from(&tenant),
        other_user: AuthenticatedUser::from(&other),
        admin: AuthenticatedUser::from(&admin),
    }
}

fn leak() -> NewMaintenanceRequest {
    NewMaintenanceRequest {
        title: "Leaking tap".to_string(),
        description: "Kitchen tap drips all night".to_string(),
        category: MaintenanceCategory::Plumbing,
        priority: MaintenancePriority::High,
        location_details: Some("Kitchen".to_string()),
        preferred_contact_method: None,
        preferred_time: None,
        tenant_available: None,
    }
}

#[tokio::test]
async fn test_create_requires_tenant_profile() {
    let fx = fixture().await;
    let err = fx.service.create(fx.admin.user_id, leak()).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::TenantProfileRequired)));
}

#[tokio::test]
async fn test_create_starts_pending() {
    let fx = fixture().await;
    let request = fx.service.create(fx.tenant_user.user_id, leak()).await.unwrap();
    assert_eq!(request.status, MaintenanceStatus::Pending);
    assert!(request.tenant_available);

    let blank = NewMaintenanceRequest {
        title: "   ".to_string(),
        ..leak()
    };
    let err = fx.service.create(fx.tenant_user.user_id, blank).await.unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::RequiredField { .. })));
}

#[tokio::test]
async fn test_full_workflow() {
    let fx = fixture().await;
    let request = fx.service.create(fx.tenant_user.user_id, leak()).await.unwrap();

    let assigned = fx.service.assign(request.id, "Bob the Plumber").await.unwrap();
    assert_eq!(assigned.request.status, MaintenanceStatus::Assigned);

    let started = fx.service.start(request.id).await.unwrap();
    assert_eq!(started.request.status, MaintenanceStatus::InProgress);

    let done = fx
        .service
        .complete(request.id, Some("Replaced washer".to_string()), Some(Decimal::new(4500, 2)))
        .await
        .unwrap();
    assert_eq!(done.request.status, MaintenanceStatus::Completed);
    assert!(done.request.completed_at.is_some());
    assert_eq!(done.tenant_email.as_deref(), Some("tina@example.com"));

    let rated = fx
        .service
        .add_feedback(request.id, &fx.tenant_user, Some("Quick fix".to_string()), Some(5))
        .await
        .unwrap();
    assert_eq!(rated.request.tenant_rating, Some(5));
}

#[tokio::test]
async fn test_out_of_order_transitions_are_rejected() {
    let fx = fixture().await;
    let request = fx.service.create(fx.tenant_user.user_id, leak()).await.unwrap();

    assert!(matches!(fx.service.start(request.id).await, Err(DomainError::BusinessRule { .. })));
    assert!(matches!(
        fx.service.complete(request.id, None, None).await,
        Err(DomainError::BusinessRule { .. })
    ));
}

#[tokio::test]
async fn test_feedback_only_on_completed() {
    let fx = fixture().await;
    let request = fx.service.create(fx.tenant_user.user_id, leak()).await.unwrap();

    let err = fx
        .service
        .add_feedback(request.id, &fx.tenant_user, None, Some(4))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::InvalidStatus { .. })));
}

#[tokio::test]
async fn test_feedback_rating_bounds_and_owner() {
    let fx = fixture().await;
    let request = fx.service.create(fx.tenant_user.user_id, leak()).await.unwrap();
    fx.service
        .update_status(
            request.id,
            StatusUpdate {
                status: Some(MaintenanceStatus::Completed),
                ..StatusUpdate::default()
            },
        )
        .await
        .unwrap();

    let err = fx
        .service
        .add_feedback(request.id, &fx.tenant_user, None, Some(6))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ValidationErr(ValidationError::InvalidRating)));

    let err = fx
        .service
        .add_feedback(request.id, &fx.other_user, None, Some(3))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccessDenied)));
}

#[tokio::test]
async fn test_status_override_stamps_completion() {
    let fx = fixture().await;
    let request = fx.service.create(fx.tenant_user.user_id, leak()).await.unwrap();
    let updated = fx
        .service
        .update_status(
            request.id,
            StatusUpdate {
                status: Some(MaintenanceStatus::Completed),
                assigned_to: Some("Crew A".to_string()),
                admin_notes: Some("Closed by phone".to_string()),
                scheduled_date: None,
            },
        )
        .await
        .unwrap();
    assert!(updated.request.completed_at.is_some());
    assert_eq!(updated.request.assigned_to.as_deref(), Some("Crew A"));
}

#[tokio::test]
async fn test_visibility_and_cancel() {
    let fx = fixture().await;
    let request = fx.service.create(fx.tenant_user.user_id, leak()).await.unwrap();

    assert!(fx.service.get(request.id, &fx.tenant_user).await.is_ok());
    assert!(fx.service.get(request.id, &fx.admin).await.is_ok());
    let err = fx.service.get(request.id, &fx.other_user).await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccessDenied)));

    assert!(fx.service.cancel(request.id, "dup", &fx.other_user).await.is_err());
    let cancelled = fx
        .service
        .cancel(request.id, "Fixed it myself", &fx.tenant_user)
        .await
        .unwrap();
    assert_eq!(cancelled.request.status, MaintenanceStatus::Cancelled);
    assert!(cancelled
        .request
        .admin_notes
        .unwrap()
        .contains("Cancelled: Fixed it myself"));
}

#[tokio::test]
async fn test_listing_filters_and_ownership() {
    let fx = fixture().await;
    let first = fx.service.create(fx.tenant_user.user_id, leak()).await.unwrap();
    fx.service.create(fx.other_user.user_id, leak()).await.unwrap();
    fx.service.assign(first.id, "Crew").await.unwrap();

    let mine = fx
        .service
        .list_for_tenant(fx.tenant_user.user_id, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(mine.total_items, 1);

    let assigned = fx
        .service
        .list(
            &MaintenanceFilter {
                status: Some(MaintenanceStatus::Assigned),
                priority: None,
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(assigned.total_items, 1);
    assert_eq!(assigned.items[0].request.id, first.id);

    let all = fx
        .service
        .list(&MaintenanceFilter::default(), &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.total_items, 2);
}

#[tokio::test]
async fn test_delete_removes_attachments() {
    let fx = fixture().await;
    let request = fx.service.create(fx.tenant_user.user_id, leak()).await.unwrap();
    let file = fx
        .service
        .attach_file(request.id, &fx.tenant_user, "tap.jpg", "image/jpeg", b"img")
        .await
        .unwrap();
    assert!(fx.storage.contains(&file.file_path).await);

    let err = fx
        .service
        .attach_file(request.id, &fx.other_user, "x.jpg", "image/jpeg", b"img")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::AccessDenied)));

    let details = fx.service.get(request.id, &fx.admin).await.unwrap();
    assert_eq!(details.files.len(), 1);

    fx.service.delete(request.id).await.unwrap();
    assert!(!fx.storage.contains(&file.file_path).await);
    assert!(matches!(
        fx.service.get(request.id, &fx.admin).await,
        Err(DomainError::NotFound { .. })
    ));
}

//! Tests for the in-memory maintenance repository

use nbj_shared::{PageRequest, SortDirection};

use crate::domain::entities::maintenance::{
    MaintenanceCategory, MaintenancePriority, MaintenanceRequest, MaintenanceStatus,
};
use crate::repositories::{MaintenanceFilter, MaintenanceRepository, MockMaintenanceRepository};

fn request(tenant_id: i64, title: &str, priority: MaintenancePriority) -> MaintenanceRequest {
    MaintenanceRequest::new(tenant_id, title, "details", MaintenanceCategory::Other, priority)
}

async fn seeded() -> MockMaintenanceRepository {
    let repo = MockMaintenanceRepository::new();
    repo.create(request(1, "Door", MaintenancePriority::Low)).await.unwrap();
    repo.create(request(1, "Boiler", MaintenancePriority::Emergency)).await.unwrap();
    repo.create(request(2, "Window", MaintenancePriority::High)).await.unwrap();
    repo
}

#[tokio::test]
async fn test_filter_by_priority() {
    let repo = seeded().await;
    let filter = MaintenanceFilter {
        priority: Some(MaintenancePriority::High),
        ..Default::default()
    };
    let page = repo.find_page(&filter, &PageRequest::default()).await.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].title, "Window");
}

#[tokio::test]
async fn test_tenant_page_sorted_by_title() {
    let repo = seeded().await;
    let request = PageRequest::default().sorted_by("title", SortDirection::Asc);
    let page = repo.find_by_tenant_page(1, &request).await.unwrap();
    let titles: Vec<_> = page.items.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Boiler", "Door"]);
}

#[tokio::test]
async fn test_counts() {
    let repo = seeded().await;
    assert_eq!(repo.count_by_status(MaintenanceStatus::Pending).await.unwrap(), 3);
    assert_eq!(
        repo.count_by_tenant_and_status(1, MaintenanceStatus::Pending).await.unwrap(),
        2
    );
    assert_eq!(repo.find_recent_by_tenant(1, 1).await.unwrap().len(), 1);
}

//! Tests for the in-memory tenant repository

use nbj_shared::{PageRequest, SortDirection};

use crate::domain::entities::tenant::Tenant;
use crate::errors::DomainError;
use crate::repositories::{MockTenantRepository, TenantRepository};

#[tokio::test]
async fn test_one_profile_per_user() {
    let repo = MockTenantRepository::new();
    repo.create(Tenant::new(1, "1 Main Rd")).await.unwrap();
    let err = repo.create(Tenant::new(1, "2 Main Rd")).await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict { .. }));
}

#[tokio::test]
async fn test_find_page_sorts_and_slices() {
    let repo = MockTenantRepository::new();
    for (user, address) in [(1, "C St"), (2, "A St"), (3, "B St")] {
        repo.create(Tenant::new(user, address)).await.unwrap();
    }

    let request = PageRequest::new(0, 2).sorted_by("propertyAddress", SortDirection::Asc);
    let page = repo.find_page(&request).await.unwrap();
    let addresses: Vec<_> = page.items.iter().map(|t| t.property_address.as_str()).collect();
    assert_eq!(addresses, vec!["A St", "B St"]);
    assert_eq!(page.total_items, 3);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn test_count_by_property() {
    let repo = MockTenantRepository::new();
    let mut a = Tenant::new(1, "Unit block");
    a.property_id = Some(10);
    let mut b = Tenant::new(2, "Unit block");
    b.property_id = Some(10);
    repo.create(a).await.unwrap();
    repo.create(b).await.unwrap();
    repo.create(Tenant::new(3, "Elsewhere")).await.unwrap();

    assert_eq!(repo.count_by_property(10).await.unwrap(), 2);
    assert_eq!(repo.count_by_property(11).await.unwrap(), 0);
    assert_eq!(repo.count().await.unwrap(), 3);
}

//! In-memory implementation of TenantRepository

use async_trait::async_trait;
use nbj_shared::{Page, PageRequest};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::tenant::Tenant;
use crate::errors::DomainError;
use crate::repositories::{directed, IdSequence};

use super::trait_::TenantRepository;

/// In-memory tenant repository
pub struct MockTenantRepository {
    tenants: Arc<RwLock<HashMap<i64, Tenant>>>,
    ids: IdSequence,
}

impl MockTenantRepository {
    pub fn new() -> Self {
        Self {
            tenants: Arc::new(RwLock::new(HashMap::new())),
            ids: IdSequence::new(),
        }
    }
}

impl Default for MockTenantRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TenantRepository for MockTenantRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tenant>, DomainError> {
        Ok(self.tenants.read().await.get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Tenant>, DomainError> {
        let tenants = self.tenants.read().await;
        Ok(tenants.values().find(|t| t.user_id == user_id).cloned())
    }

    async fn find_by_user_ids(&self, user_ids: &[i64]) -> Result<Vec<Tenant>, DomainError> {
        let tenants = self.tenants.read().await;
        let mut found: Vec<Tenant> = tenants
            .values()
            .filter(|t| user_ids.contains(&t.user_id))
            .cloned()
            .collect();
        found.sort_by_key(|t| t.id);
        Ok(found)
    }

    async fn find_page(&self, page: &PageRequest) -> Result<Page<Tenant>, DomainError> {
        let mut all: Vec<Tenant> = self.tenants.read().await.values().cloned().collect();
        all.sort_by(|a, b| {
            let ordering = match page.sort_by.as_str() {
                "id" => a.id.cmp(&b.id),
                "updatedAt" => a.updated_at.cmp(&b.updated_at),
                "propertyAddress" => a.property_address.cmp(&b.property_address),
                "status" => a.status.as_str().cmp(b.status.as_str()),
                "leaseEndDate" => a.lease_end_date.cmp(&b.lease_end_date),
                _ => a.created_at.cmp(&b.created_at),
            };
            directed(ordering.then(a.id.cmp(&b.id)), page.sort_dir)
        });
        Ok(Page::from_vec(all, page))
    }

    async fn create(&self, mut tenant: Tenant) -> Result<Tenant, DomainError> {
        let mut tenants = self.tenants.write().await;
        if tenants.values().any(|t| t.user_id == tenant.user_id) {
            return Err(DomainError::Conflict {
                message: "User already has a tenant profile".to_string(),
            });
        }
        tenant.id = self.ids.next();
        tenants.insert(tenant.id, tenant.clone());
        Ok(tenant)
    }

    async fn update(&self, tenant: Tenant) -> Result<Tenant, DomainError> {
        let mut tenants = self.tenants.write().await;
        if !tenants.contains_key(&tenant.id) {
            return Err(DomainError::not_found("Tenant"));
        }
        tenants.insert(tenant.id, tenant.clone());
        Ok(tenant)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.tenants.write().await.remove(&id).is_some())
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.tenants.read().await.contains_key(&id))
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.tenants.read().await.len() as u64)
    }

    async fn count_by_property(&self, property_id: i64) -> Result<u64, DomainError> {
        let tenants = self.tenants.read().await;
        Ok(tenants
            .values()
            .filter(|t| t.property_id == Some(property_id))
            .count() as u64)
    }
}

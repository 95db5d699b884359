//! In-memory implementation of MaintenanceRepository

use async_trait::async_trait;
use nbj_shared::{Page, PageRequest, SortDirection};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::maintenance::{MaintenanceRequest, MaintenanceStatus};
use crate::errors::DomainError;
use crate::repositories::{directed, IdSequence};

use super::trait_::{MaintenanceFilter, MaintenanceRepository};

/// In-memory maintenance repository
pub struct MockMaintenanceRepository {
    requests: Arc<RwLock<HashMap<i64, MaintenanceRequest>>>,
    ids: IdSequence,
}

impl MockMaintenanceRepository {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            ids: IdSequence::new(),
        }
    }

    async fn sorted<F>(&self, keep: F, sort_by: &str, dir: SortDirection) -> Vec<MaintenanceRequest>
    where
        F: Fn(&MaintenanceRequest) -> bool,
    {
        let mut found: Vec<MaintenanceRequest> = self
            .requests
            .read()
            .await
            .values()
            .filter(|r| keep(r))
            .cloned()
            .collect();
        found.sort_by(|a, b| directed(compare(a, b, sort_by).then(a.id.cmp(&b.id)), dir));
        found
    }
}

fn compare(a: &MaintenanceRequest, b: &MaintenanceRequest, field: &str) -> Ordering {
    match field {
        "id" => a.id.cmp(&b.id),
        "updatedAt" => a.updated_at.cmp(&b.updated_at),
        "title" => a.title.cmp(&b.title),
        "status" => a.status.as_str().cmp(b.status.as_str()),
        "priority" => a.priority.cmp(&b.priority),
        "category" => a.category.as_str().cmp(b.category.as_str()),
        "scheduledDate" => a.scheduled_date.cmp(&b.scheduled_date),
        "completedAt" => a.completed_at.cmp(&b.completed_at),
        _ => a.created_at.cmp(&b.created_at),
    }
}

impl Default for MockMaintenanceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MaintenanceRepository for MockMaintenanceRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<MaintenanceRequest>, DomainError> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn find_page(
        &self,
        filter: &MaintenanceFilter,
        page: &PageRequest,
    ) -> Result<Page<MaintenanceRequest>, DomainError> {
        let all = self
            .sorted(|r| filter.matches(r), &page.sort_by, page.sort_dir)
            .await;
        Ok(Page::from_vec(all, page))
    }

    async fn find_by_tenant_page(
        &self,
        tenant_id: i64,
        page: &PageRequest,
    ) -> Result<Page<MaintenanceRequest>, DomainError> {
        let all = self
            .sorted(|r| r.tenant_id == tenant_id, &page.sort_by, page.sort_dir)
            .await;
        Ok(Page::from_vec(all, page))
    }

    async fn find_recent_by_tenant(
        &self,
        tenant_id: i64,
        limit: usize,
    ) -> Result<Vec<MaintenanceRequest>, DomainError> {
        let mut all = self
            .sorted(|r| r.tenant_id == tenant_id, "createdAt", SortDirection::Desc)
            .await;
        all.truncate(limit);
        Ok(all)
    }

    async fn create(&self, mut request: MaintenanceRequest) -> Result<MaintenanceRequest, DomainError> {
        request.id = self.ids.next();
        self.requests
            .write()
            .await
            .insert(request.id, request.clone());
        Ok(request)
    }

    async fn update(&self, request: MaintenanceRequest) -> Result<MaintenanceRequest, DomainError> {
        let mut requests = self.requests.write().await;
        if !requests.contains_key(&request.id) {
            return Err(DomainError::not_found("Maintenance request"));
        }
        requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.requests.write().await.remove(&id).is_some())
    }

    async fn count_by_status(&self, status: MaintenanceStatus) -> Result<u64, DomainError> {
        let requests = self.requests.read().await;
        Ok(requests.values().filter(|r| r.status == status).count() as u64)
    }

    async fn count_by_tenant_and_status(
        &self,
        tenant_id: i64,
        status: MaintenanceStatus,
    ) -> Result<u64, DomainError> {
        let requests = self.requests.read().await;
        Ok(requests
            .values()
            .filter(|r| r.tenant_id == tenant_id && r.status == status)
            .count() as u64)
    }
}

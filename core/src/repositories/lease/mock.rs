//! In-memory implementation of LeaseRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::lease::{LeaseAgreement, LeaseStatus};
use crate::errors::DomainError;
use crate::repositories::IdSequence;

use super::trait_::LeaseRepository;

/// In-memory lease repository
pub struct MockLeaseRepository {
    leases: Arc<RwLock<HashMap<i64, LeaseAgreement>>>,
    ids: IdSequence,
}

impl MockLeaseRepository {
    pub fn new() -> Self {
        Self {
            leases: Arc::new(RwLock::new(HashMap::new())),
            ids: IdSequence::new(),
        }
    }

    async fn collect<F>(&self, keep: F) -> Vec<LeaseAgreement>
    where
        F: Fn(&LeaseAgreement) -> bool,
    {
        let mut found: Vec<LeaseAgreement> = self
            .leases
            .read()
            .await
            .values()
            .filter(|l| keep(l))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        found
    }
}

impl Default for MockLeaseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeaseRepository for MockLeaseRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<LeaseAgreement>, DomainError> {
        Ok(self.leases.read().await.get(&id).cloned())
    }

    async fn find_by_tenant(&self, tenant_id: i64) -> Result<Vec<LeaseAgreement>, DomainError> {
        Ok(self.collect(|l| l.tenant_id == tenant_id).await)
    }

    async fn find_by_status(
        &self,
        status: Option<LeaseStatus>,
    ) -> Result<Vec<LeaseAgreement>, DomainError> {
        Ok(self
            .collect(|l| status.map_or(true, |wanted| l.status == wanted))
            .await)
    }

    async fn find_expiring(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LeaseAgreement>, DomainError> {
        let mut found = self
            .collect(|l| l.status == LeaseStatus::Active && l.end_date >= from && l.end_date <= to)
            .await;
        found.sort_by_key(|l| (l.end_date, l.id));
        Ok(found)
    }

    async fn create(&self, mut lease: LeaseAgreement) -> Result<LeaseAgreement, DomainError> {
        lease.id = self.ids.next();
        self.leases.write().await.insert(lease.id, lease.clone());
        Ok(lease)
    }

    async fn update(&self, lease: LeaseAgreement) -> Result<LeaseAgreement, DomainError> {
        let mut leases = self.leases.write().await;
        if !leases.contains_key(&lease.id) {
            return Err(DomainError::not_found("Lease agreement"));
        }
        leases.insert(lease.id, lease.clone());
        Ok(lease)
    }

    async fn count_by_status(&self, status: LeaseStatus) -> Result<u64, DomainError> {
        let leases = self.leases.read().await;
        Ok(leases.values().filter(|l| l.status == status).count() as u64)
    }
}

//! Dashboard figures for tenants and administrators

use std::sync::Arc;

use crate::domain::entities::maintenance::{MaintenanceRequest, MaintenanceStatus};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{MaintenanceRepository, PropertyRepository, TenantRepository, UserRepository};

const RECENT_REQUESTS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct TenantDashboard {
    pub name: String,
    pub email: String,
    pub property_address: String,
    pub pending_requests: u64,
    /// Requests IN_PROGRESS
    pub active_requests: u64,
    pub completed_requests: u64,
    /// Newest first
    pub recent_requests: Vec<MaintenanceRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminDashboard {
    pub total_tenants: u64,
    pub pending_maintenance_requests: u64,
    pub total_properties: u64,
}

pub struct DashboardService {
    users: Arc<dyn UserRepository>,
    tenants: Arc<dyn TenantRepository>,
    requests: Arc<dyn MaintenanceRepository>,
    properties: Arc<dyn PropertyRepository>,
}

impl DashboardService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        tenants: Arc<dyn TenantRepository>,
        requests: Arc<dyn MaintenanceRepository>,
        properties: Arc<dyn PropertyRepository>,
    ) -> Self {
        Self {
            users,
            tenants,
            requests,
            properties,
        }
    }

    pub async fn tenant_dashboard(&self, user_id: i64) -> DomainResult<TenantDashboard> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let tenant = self
            .tenants
            .find_by_user_id(user_id)
            .await?
            .ok_or(AuthError::TenantProfileRequired)?;

        let count = |status| self.requests.count_by_tenant_and_status(tenant.id, status);
        let pending_requests = count(MaintenanceStatus::Pending).await?;
        let active_requests = count(MaintenanceStatus::InProgress).await?;
        let completed_requests = count(MaintenanceStatus::Completed).await?;
        let recent_requests = self
            .requests
            .find_recent_by_tenant(tenant.id, RECENT_REQUESTS)
            .await?;

        Ok(TenantDashboard {
            name: user.full_name(),
            email: user.email,
            property_address: tenant.property_address,
            pending_requests,
            active_requests,
            completed_requests,
            recent_requests,
        })
    }

    pub async fn admin_dashboard(&self) -> DomainResult<AdminDashboard> {
        Ok(AdminDashboard {
            total_tenants: self.tenants.count().await?,
            pending_maintenance_requests: self
                .requests
                .count_by_status(MaintenanceStatus::Pending)
                .await?,
            total_properties: self.properties.count().await?,
        })
    }
}

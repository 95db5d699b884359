use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use nbj_core::entities::MaintenanceRequest;
use nbj_core::services::{AdminDashboard, TenantDashboard};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub name: String,
    pub email: String,
    pub property_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentRequestDto {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<MaintenanceRequest> for RecentRequestDto {
    fn from(request: MaintenanceRequest) -> Self {
        Self {
            id: request.id,
            title: request.title,
            category: request.category.to_string(),
            priority: request.priority.to_string(),
            status: request.status.to_string(),
            created_at: request.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceSummary {
    pub active_requests: u64,
    pub pending_requests: u64,
    pub completed_requests: u64,
    pub recent_requests: Vec<RecentRequestDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantDashboardDto {
    pub profile: ProfileSummary,
    pub maintenance: MaintenanceSummary,
}

impl From<TenantDashboard> for TenantDashboardDto {
    fn from(dashboard: TenantDashboard) -> Self {
        Self {
            profile: ProfileSummary {
                name: dashboard.name,
                email: dashboard.email,
                property_address: dashboard.property_address,
            },
            maintenance: MaintenanceSummary {
                active_requests: dashboard.active_requests,
                pending_requests: dashboard.pending_requests,
                completed_requests: dashboard.completed_requests,
                recent_requests: dashboard
                    .recent_requests
                    .into_iter()
                    .map(RecentRequestDto::from)
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboardDto {
    pub total_tenants: u64,
    pub pending_maintenance_requests: u64,
    pub total_properties: u64,
}

impl From<AdminDashboard> for AdminDashboardDto {
    fn from(dashboard: AdminDashboard) -> Self {
        Self {
            total_tenants: dashboard.total_tenants,
            pending_maintenance_requests: dashboard.pending_maintenance_requests,
            total_properties: dashboard.total_properties,
        }
    }
}

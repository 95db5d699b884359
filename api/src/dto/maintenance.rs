use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use nbj_core::entities::{MaintenanceCategory, MaintenancePriority, MaintenanceStatus, StatusUpdate};
use nbj_core::repositories::MaintenanceFilter;
use nbj_core::services::{MaintenanceDetails, NewMaintenanceRequest};
use nbj_shared::{Page, PageRequest};

use super::file::AttachmentDto;
use crate::handlers::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    #[validate(length(min = 5, max = 100, message = "Title must be between 5 and 100 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 1000, message = "Description must be at most 1000 characters"))]
    pub description: String,

    pub category: String,
    pub priority: String,

    #[validate(length(max = 500))]
    pub location_details: Option<String>,
    pub preferred_contact_method: Option<String>,
    pub preferred_time: Option<String>,
    pub tenant_available: Option<bool>,
}

impl TryFrom<CreateMaintenanceRequest> for NewMaintenanceRequest {
    type Error = ApiError;

    fn try_from(request: CreateMaintenanceRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            category: parse_field::<MaintenanceCategory>(&request.category)?,
            priority: parse_field::<MaintenancePriority>(&request.priority)?,
            title: request.title,
            description: request.description,
            location_details: request.location_details,
            preferred_contact_method: request.preferred_contact_method,
            preferred_time: request.preferred_time,
            tenant_available: request.tenant_available,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceListQuery {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl MaintenanceListQuery {
    pub fn filter(&self) -> Result<MaintenanceFilter, ApiError> {
        Ok(MaintenanceFilter {
            status: parse_optional::<MaintenanceStatus>(self.status.as_deref())?,
            priority: parse_optional::<MaintenancePriority>(self.priority.as_deref())?,
        })
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::from_parts(
            self.page,
            self.size,
            self.sort_by.as_deref(),
            self.sort_dir.as_deref(),
        )
    }
}

/// Admin override; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub admin_notes: Option<String>,
    /// RFC 3339, or a local `YYYY-MM-DDTHH:MM:SS` read as UTC
    pub scheduled_date: Option<String>,
}

impl TryFrom<UpdateStatusRequest> for StatusUpdate {
    type Error = ApiError;

    fn try_from(request: UpdateStatusRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            status: parse_optional::<MaintenanceStatus>(request.status.as_deref())?,
            assigned_to: request.assigned_to.filter(|a| !a.trim().is_empty()),
            admin_notes: request.admin_notes,
            scheduled_date: request
                .scheduled_date
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .map(parse_date_time)
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    #[validate(length(min = 1, max = 100, message = "assignedTo is required"))]
    pub assigned_to: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRequest {
    pub resolution_summary: Option<String>,
    pub actual_cost: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelRequest {
    #[serde(default)]
    pub reason: String,
}

/// Rating is checked by the service so it can answer INVALID_RATING
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRequest {
    #[validate(length(max = 1000))]
    #[serde(alias = "feedback")]
    pub tenant_feedback: Option<String>,
    pub rating: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSummaryDto {
    pub id: i64,
    pub email: Option<String>,
    pub property_address: String,
    pub unit_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequestDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: String,
    pub status: String,
    pub location_details: Option<String>,
    pub preferred_contact_method: Option<String>,
    pub preferred_time: Option<String>,
    pub tenant_available: bool,
    pub assigned_to: Option<String>,
    pub admin_notes: Option<String>,
    pub tenant_feedback: Option<String>,
    pub rating: Option<i32>,
    pub resolution_summary: Option<String>,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub tenant: Option<TenantSummaryDto>,
    pub files: Vec<AttachmentDto>,
}

impl From<MaintenanceDetails> for MaintenanceRequestDto {
    fn from(details: MaintenanceDetails) -> Self {
        let request = details.request;
        let tenant = details.tenant.map(|tenant| TenantSummaryDto {
            id: tenant.id,
            email: details.tenant_email,
            property_address: tenant.property_address,
            unit_number: tenant.unit_number,
        });
        Self {
            id: request.id,
            title: request.title,
            description: request.description,
            category: request.category.to_string(),
            priority: request.priority.to_string(),
            status: request.status.to_string(),
            location_details: request.location_details,
            preferred_contact_method: request.preferred_contact_method,
            preferred_time: request.preferred_time,
            tenant_available: request.tenant_available,
            assigned_to: request.assigned_to,
            admin_notes: request.admin_notes,
            tenant_feedback: request.tenant_feedback,
            rating: request.tenant_rating,
            resolution_summary: request.resolution_summary,
            estimated_cost: request.estimated_cost,
            actual_cost: request.actual_cost,
            created_at: request.created_at,
            updated_at: request.updated_at,
            scheduled_date: request.scheduled_date,
            started_at: request.started_at,
            completed_at: request.completed_at,
            tenant,
            files: details.files.iter().map(AttachmentDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceListResponse {
    pub requests: Vec<MaintenanceRequestDto>,
    pub current_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub page_size: u32,
}

impl From<Page<MaintenanceDetails>> for MaintenanceListResponse {
    fn from(page: Page<MaintenanceDetails>) -> Self {
        let page = page.map(MaintenanceRequestDto::from);
        Self {
            requests: page.items,
            current_page: page.page,
            total_items: page.total_items,
            total_pages: page.total_pages,
            page_size: page.size,
        }
    }
}

/// Parses an upper-case enum name, answering 400 on unknown values
pub fn parse_field<T>(value: &str) -> Result<T, ApiError>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .parse::<T>()
        .map_err(|e| ApiError::from(nbj_core::DomainError::validation(e)))
}

pub fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: std::str::FromStr<Err = String>,
{
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_field::<T>)
        .transpose()
}

fn parse_date_time(value: &str) -> Result<DateTime<Utc>, ApiError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            ApiError::from(nbj_core::DomainError::validation(format!(
                "Invalid date-time: {}",
                value
            )))
        })
}

//! Maintenance request service implementation

use std::sync::Arc;

use rust_decimal::Decimal;

use nbj_shared::{Page, PageRequest};

use crate::domain::entities::attachment::MaintenanceRequestFile;
use crate::domain::entities::maintenance::{
    MaintenanceCategory, MaintenancePriority, MaintenanceRequest, StatusUpdate,
};
use crate::domain::entities::tenant::Tenant;
use crate::domain::value_objects::AuthenticatedUser;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::{MaintenanceFilter, MaintenanceRepository, TenantRepository, UserRepository};
use crate::services::file::FileService;

/// What a tenant submits
#[derive(Debug, Clone)]
pub struct NewMaintenanceRequest {
    pub title: String,
    pub description: String,
    pub category: MaintenanceCategory,
    pub priority: MaintenancePriority,
    pub location_details: Option<String>,
    pub preferred_contact_method: Option<String>,
    pub preferred_time: Option<String>,
    pub tenant_available: Option<bool>,
}

impl NewMaintenanceRequest {
    fn validate(&self) -> DomainResult<()> {
        let title = self.title.trim().chars().count();
        if title == 0 {
            return Err(ValidationError::RequiredField {
                field: "title".to_string(),
            }
            .into());
        }
        if title > 200 {
            return Err(DomainError::validation("title must be at most 200 characters"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "description".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

/// A request with the tenant contact data and attachments shown with it
#[derive(Debug, Clone, PartialEq)]
pub struct MaintenanceDetails {
    pub request: MaintenanceRequest,
    pub tenant: Option<Tenant>,
    pub tenant_email: Option<String>,
    pub files: Vec<MaintenanceRequestFile>,
}

pub struct MaintenanceService {
    requests: Arc<dyn MaintenanceRepository>,
    tenants: Arc<dyn TenantRepository>,
    users: Arc<dyn UserRepository>,
    files: Arc<FileService>,
}

impl MaintenanceService {
    pub fn new(
        requests: Arc<dyn MaintenanceRepository>,
        tenants: Arc<dyn TenantRepository>,
        users: Arc<dyn UserRepository>,
        files: Arc<FileService>,
    ) -> Self {
        Self {
            requests,
            tenants,
            users,
            files,
        }
    }

    /// Opens a PENDING request for the caller's tenant profile
    ///
    /// # Errors
    ///
    /// * `AuthError::TenantProfileRequired` - The caller has no tenant profile
    /// * `ValidationError::*` - Missing title or description
    pub async fn create(
        &self,
        user_id: i64,
        input: NewMaintenanceRequest,
    ) -> DomainResult<MaintenanceRequest> {
        input.validate()?;
        let tenant = self.tenant_of(user_id).await?;

        let mut request = MaintenanceRequest::new(
            tenant.id,
            input.title.trim(),
            input.description.trim(),
            input.category,
            input.priority,
        );
        request.location_details = input.location_details;
        request.preferred_contact_method = input.preferred_contact_method;
        request.preferred_time = input.preferred_time;
        request.tenant_available = input.tenant_available.unwrap_or(true);

        let request = self.requests.create(request).await?;
        tracing::info!(
            request_id = request.id,
            tenant_id = tenant.id,
            priority = %request.priority,
            "Maintenance request created"
        );
        Ok(request)
    }

    /// Admin listing with optional status/priority filters
    pub async fn list(
        &self,
        filter: &MaintenanceFilter,
        page: &PageRequest,
    ) -> DomainResult<Page<MaintenanceDetails>> {
        let requests = self.requests.find_page(filter, page).await?;
        self.expand_page(requests).await
    }

    /// The caller's own requests
    pub async fn list_for_tenant(
        &self,
        user_id: i64,
        page: &PageRequest,
    ) -> DomainResult<Page<MaintenanceDetails>> {
        let tenant = self.tenant_of(user_id).await?;
        let requests = self.requests.find_by_tenant_page(tenant.id, page).await?;
        self.expand_page(requests).await
    }

    /// Visible to admins and to the tenant who owns the request
    pub async fn get(&self, id: i64, caller: &AuthenticatedUser) -> DomainResult<MaintenanceDetails> {
        let request = self.find(id).await?;
        self.ensure_owner_or_admin(&request, caller).await?;
        self.expand(request).await
    }

    /// Admin override of status, assignee, notes and schedule
    pub async fn update_status(&self, id: i64, update: StatusUpdate) -> DomainResult<MaintenanceDetails> {
        let mut request = self.find(id).await?;
        request.apply_status_update(update);
        let request = self.requests.update(request).await?;
        tracing::info!(request_id = id, status = %request.status, "Maintenance request updated");
        self.expand(request).await
    }

    pub async fn assign(&self, id: i64, assignee: &str) -> DomainResult<MaintenanceDetails> {
        let mut request = self.find(id).await?;
        request.assign_to(assignee.trim())?;
        self.save(request, "assigned").await
    }

    pub async fn start(&self, id: i64) -> DomainResult<MaintenanceDetails> {
        let mut request = self.find(id).await?;
        request.start()?;
        self.save(request, "started").await
    }

    pub async fn complete(
        &self,
        id: i64,
        resolution_summary: Option<String>,
        actual_cost: Option<Decimal>,
    ) -> DomainResult<MaintenanceDetails> {
        if actual_cost.is_some_and(|cost| cost < Decimal::ZERO) {
            return Err(DomainError::validation("actualCost must not be negative"));
        }
        let mut request = self.find(id).await?;
        request.complete(resolution_summary, actual_cost)?;
        self.save(request, "completed").await
    }

    /// Cancels from any status; tenants may cancel only their own requests
    pub async fn cancel(
        &self,
        id: i64,
        reason: &str,
        caller: &AuthenticatedUser,
    ) -> DomainResult<MaintenanceDetails> {
        let mut request = self.find(id).await?;
        self.ensure_owner_or_admin(&request, caller).await?;
        let reason = match reason.trim() {
            "" => "No reason given",
            r => r,
        };
        request.cancel(reason);
        self.save(request, "cancelled").await
    }

    /// Tenant rating and comment on their own COMPLETED request
    pub async fn add_feedback(
        &self,
        id: i64,
        caller: &AuthenticatedUser,
        feedback: Option<String>,
        rating: Option<i32>,
    ) -> DomainResult<MaintenanceDetails> {
        let mut request = self.find(id).await?;
        let tenant = self.tenant_of(caller.user_id).await?;
        if request.tenant_id != tenant.id {
            tracing::warn!(request_id = id, user_id = caller.user_id, "Feedback on foreign request refused");
            return Err(AuthError::AccessDenied.into());
        }
        request.add_feedback(feedback, rating)?;
        self.save(request, "rated").await
    }

    /// Deletes the request along with its attachment files
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        self.find(id).await?;
        let removed = self.files.delete_for_request(id).await?;
        self.requests.delete(id).await?;
        tracing::info!(request_id = id, attachments = removed, "Maintenance request deleted");
        Ok(())
    }

    /// Stores an upload against a request the caller may see
    pub async fn attach_file(
        &self,
        id: i64,
        caller: &AuthenticatedUser,
        original_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> DomainResult<MaintenanceRequestFile> {
        let request = self.find(id).await?;
        self.ensure_owner_or_admin(&request, caller).await?;
        self.files
            .store_for_request(request.id, original_name, content_type, bytes)
            .await
    }

    async fn find(&self, id: i64) -> DomainResult<MaintenanceRequest> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Maintenance request {}", id)))
    }

    async fn tenant_of(&self, user_id: i64) -> DomainResult<Tenant> {
        self.tenants
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AuthError::TenantProfileRequired.into())
    }

    async fn ensure_owner_or_admin(
        &self,
        request: &MaintenanceRequest,
        caller: &AuthenticatedUser,
    ) -> DomainResult<()> {
        if caller.is_admin() {
            return Ok(());
        }
        let owns = self
            .tenants
            .find_by_user_id(caller.user_id)
            .await?
            .is_some_and(|t| t.id == request.tenant_id);
        if owns {
            Ok(())
        } else {
            tracing::warn!(request_id = request.id, user_id = caller.user_id, "Maintenance access denied");
            Err(AuthError::AccessDenied.into())
        }
    }

    async fn save(&self, request: MaintenanceRequest, action: &str) -> DomainResult<MaintenanceDetails> {
        let request = self.requests.update(request).await?;
        tracing::info!(request_id = request.id, status = %request.status, "Maintenance request {}", action);
        self.expand(request).await
    }

    async fn expand(&self, request: MaintenanceRequest) -> DomainResult<MaintenanceDetails> {
        let tenant = self.tenants.find_by_id(request.tenant_id).await?;
        let tenant_email = match &tenant {
            Some(t) => self.users.find_by_id(t.user_id).await?.map(|u| u.email),
            None => None,
        };
        let files = self.files.list_for_request(request.id).await?;
        Ok(MaintenanceDetails {
            request,
            tenant,
            tenant_email,
            files,
        })
    }

    async fn expand_page(
        &self,
        page: Page<MaintenanceRequest>,
    ) -> DomainResult<Page<MaintenanceDetails>> {
        let mut items = Vec::with_capacity(page.items.len());
        for request in page.items {
            items.push(self.expand(request).await?);
        }
        Ok(Page {
            items,
            page: page.page,
            size: page.size,
            total_items: page.total_items,
            total_pages: page.total_pages,
        })
    }
}

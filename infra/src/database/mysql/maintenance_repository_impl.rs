//! MySQL implementation of the MaintenanceRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use nbj_core::domain::entities::maintenance::{MaintenanceRequest, MaintenanceStatus};
use nbj_core::errors::DomainError;
use nbj_core::repositories::{MaintenanceFilter, MaintenanceRepository};
use nbj_shared::{Page, PageRequest};

use super::{column, db_error, enum_column, order_and_limit};

const REQUEST_COLUMNS: &str = "id, tenant_id, title, description, category, priority, status, \
     location_details, preferred_contact_method, preferred_time, tenant_available, estimated_cost, \
     actual_cost, assigned_to, assigned_at, scheduled_date, started_at, completed_at, admin_notes, \
     tenant_feedback, tenant_rating, resolution_summary, created_at, updated_at";

// Priority sorts by severity, not alphabetically
const SORT_COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
    ("title", "title"),
    ("status", "status"),
    ("priority", "FIELD(priority, 'LOW', 'MEDIUM', 'HIGH', 'URGENT', 'EMERGENCY')"),
    ("category", "category"),
    ("scheduledDate", "scheduled_date"),
    ("completedAt", "completed_at"),
];

/// MySQL implementation of MaintenanceRepository
pub struct MySqlMaintenanceRepository {
    pool: MySqlPool,
}

impl MySqlMaintenanceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &MySqlRow) -> Result<MaintenanceRequest, DomainError> {
        Ok(MaintenanceRequest {
            id: column(row, "id")?,
            tenant_id: column(row, "tenant_id")?,
            title: column(row, "title")?,
            description: column(row, "description")?,
            category: enum_column(row, "category")?,
            priority: enum_column(row, "priority")?,
            status: enum_column(row, "status")?,
            location_details: column(row, "location_details")?,
            preferred_contact_method: column(row, "preferred_contact_method")?,
            preferred_time: column(row, "preferred_time")?,
            tenant_available: column(row, "tenant_available")?,
            estimated_cost: column(row, "estimated_cost")?,
            actual_cost: column(row, "actual_cost")?,
            assigned_to: column(row, "assigned_to")?,
            assigned_at: column(row, "assigned_at")?,
            scheduled_date: column(row, "scheduled_date")?,
            started_at: column(row, "started_at")?,
            completed_at: column(row, "completed_at")?,
            admin_notes: column(row, "admin_notes")?,
            tenant_feedback: column(row, "tenant_feedback")?,
            tenant_rating: column(row, "tenant_rating")?,
            resolution_summary: column(row, "resolution_summary")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    /// Appends ` WHERE ...` for the parts of a filter that are set
    fn push_filter(
        builder: &mut QueryBuilder<'_, MySql>,
        filter: &MaintenanceFilter,
        tenant_id: Option<i64>,
    ) {
        let mut joiner = " WHERE ";
        if let Some(tenant_id) = tenant_id {
            builder.push(joiner).push("tenant_id = ").push_bind(tenant_id);
            joiner = " AND ";
        }
        if let Some(status) = filter.status {
            builder.push(joiner).push("status = ").push_bind(status.as_str());
            joiner = " AND ";
        }
        if let Some(priority) = filter.priority {
            builder.push(joiner).push("priority = ").push_bind(priority.as_str());
        }
    }

    async fn fetch_page(
        &self,
        filter: &MaintenanceFilter,
        tenant_id: Option<i64>,
        page: &PageRequest,
    ) -> Result<Page<MaintenanceRequest>, DomainError> {
        let mut count: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT COUNT(*) AS total FROM maintenance_requests");
        let mut select: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM maintenance_requests", REQUEST_COLUMNS));

        Self::push_filter(&mut count, filter, tenant_id);
        Self::push_filter(&mut select, filter, tenant_id);
        select.push(order_and_limit(page, SORT_COLUMNS, "created_at"));

        let row = count
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count maintenance requests", e))?;
        let total: i64 = column(&row, "total")?;

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list maintenance requests", e))?;
        let items = rows
            .iter()
            .map(Self::row_to_request)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, page, total as u64))
    }
}

#[async_trait]
impl MaintenanceRepository for MySqlMaintenanceRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<MaintenanceRequest>, DomainError> {
        let query = format!("SELECT {} FROM maintenance_requests WHERE id = ?", REQUEST_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find maintenance request", e))?;
        row.as_ref().map(Self::row_to_request).transpose()
    }

    async fn find_page(
        &self,
        filter: &MaintenanceFilter,
        page: &PageRequest,
    ) -> Result<Page<MaintenanceRequest>, DomainError> {
        self.fetch_page(filter, None, page).await
    }

    async fn find_by_tenant_page(
        &self,
        tenant_id: i64,
        page: &PageRequest,
    ) -> Result<Page<MaintenanceRequest>, DomainError> {
        self.fetch_page(&MaintenanceFilter::default(), Some(tenant_id), page)
            .await
    }

    async fn find_recent_by_tenant(
        &self,
        tenant_id: i64,
        limit: usize,
    ) -> Result<Vec<MaintenanceRequest>, DomainError> {
        let query = format!(
            "SELECT {} FROM maintenance_requests WHERE tenant_id = ? \
             ORDER BY created_at DESC, id DESC LIMIT ?",
            REQUEST_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(tenant_id)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find recent maintenance requests", e))?;
        rows.iter().map(Self::row_to_request).collect()
    }

    async fn create(&self, mut request: MaintenanceRequest) -> Result<MaintenanceRequest, DomainError> {
        let query = r#"
            INSERT INTO maintenance_requests (
                tenant_id, title, description, category, priority, status, location_details,
                preferred_contact_method, preferred_time, tenant_available, estimated_cost,
                actual_cost, assigned_to, assigned_at, scheduled_date, started_at, completed_at,
                admin_notes, tenant_feedback, tenant_rating, resolution_summary,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(request.tenant_id)
            .bind(&request.title)
            .bind(&request.description)
            .bind(request.category.as_str())
            .bind(request.priority.as_str())
            .bind(request.status.as_str())
            .bind(&request.location_details)
            .bind(&request.preferred_contact_method)
            .bind(&request.preferred_time)
            .bind(request.tenant_available)
            .bind(request.estimated_cost)
            .bind(request.actual_cost)
            .bind(&request.assigned_to)
            .bind(request.assigned_at)
            .bind(request.scheduled_date)
            .bind(request.started_at)
            .bind(request.completed_at)
            .bind(&request.admin_notes)
            .bind(&request.tenant_feedback)
            .bind(request.tenant_rating)
            .bind(&request.resolution_summary)
            .bind(request.created_at)
            .bind(request.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create maintenance request", e))?;

        request.id = result.last_insert_id() as i64;
        Ok(request)
    }

    async fn update(&self, request: MaintenanceRequest) -> Result<MaintenanceRequest, DomainError> {
        let query = r#"
            UPDATE maintenance_requests SET
                title = ?, description = ?, category = ?, priority = ?, status = ?,
                location_details = ?, preferred_contact_method = ?, preferred_time = ?,
                tenant_available = ?, estimated_cost = ?, actual_cost = ?, assigned_to = ?,
                assigned_at = ?, scheduled_date = ?, started_at = ?, completed_at = ?,
                admin_notes = ?, tenant_feedback = ?, tenant_rating = ?, resolution_summary = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&request.title)
            .bind(&request.description)
            .bind(request.category.as_str())
            .bind(request.priority.as_str())
            .bind(request.status.as_str())
            .bind(&request.location_details)
            .bind(&request.preferred_contact_method)
            .bind(&request.preferred_time)
            .bind(request.tenant_available)
            .bind(request.estimated_cost)
            .bind(request.actual_cost)
            .bind(&request.assigned_to)
            .bind(request.assigned_at)
            .bind(request.scheduled_date)
            .bind(request.started_at)
            .bind(request.completed_at)
            .bind(&request.admin_notes)
            .bind(&request.tenant_feedback)
            .bind(request.tenant_rating)
            .bind(&request.resolution_summary)
            .bind(request.updated_at)
            .bind(request.id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update maintenance request", e))?;

        if result.rows_affected() == 0 && self.find_by_id(request.id).await?.is_none() {
            return Err(DomainError::not_found("Maintenance request"));
        }
        Ok(request)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM maintenance_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete maintenance request", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_status(&self, status: MaintenanceStatus) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM maintenance_requests WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count maintenance requests", e))?;
        let total: i64 = column(&row, "total")?;
        Ok(total as u64)
    }

    async fn count_by_tenant_and_status(
        &self,
        tenant_id: i64,
        status: MaintenanceStatus,
    ) -> Result<u64, DomainError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total FROM maintenance_requests WHERE tenant_id = ? AND status = ?",
        )
        .bind(tenant_id)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count tenant maintenance requests", e))?;
        let total: i64 = column(&row, "total")?;
        Ok(total as u64)
    }
}

//! MySQL implementation of the TenantRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use nbj_core::domain::entities::tenant::Tenant;
use nbj_core::errors::DomainError;
use nbj_core::repositories::TenantRepository;
use nbj_shared::{Page, PageRequest};

use super::{column, db_error, enum_column, order_and_limit};

const TENANT_COLUMNS: &str = "id, user_id, property_id, property_address, unit_number, rent_amount, \
     security_deposit, lease_start_date, lease_end_date, status, emergency_contact_name, \
     emergency_contact_phone, emergency_contact_relationship, move_in_date, move_out_date, \
     notes, created_at, updated_at";

const SORT_COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("createdAt", "created_at"),
    ("updatedAt", "updated_at"),
    ("propertyAddress", "property_address"),
    ("status", "status"),
    ("leaseEndDate", "lease_end_date"),
];

/// MySQL implementation of TenantRepository
pub struct MySqlTenantRepository {
    pool: MySqlPool,
}

impl MySqlTenantRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_tenant(row: &MySqlRow) -> Result<Tenant, DomainError> {
        Ok(Tenant {
            id: column(row, "id")?,
            user_id: column(row, "user_id")?,
            property_id: column(row, "property_id")?,
            property_address: column(row, "property_address")?,
            unit_number: column(row, "unit_number")?,
            rent_amount: column(row, "rent_amount")?,
            security_deposit: column(row, "security_deposit")?,
            lease_start_date: column(row, "lease_start_date")?,
            lease_end_date: column(row, "lease_end_date")?,
            status: enum_column(row, "status")?,
            emergency_contact_name: column(row, "emergency_contact_name")?,
            emergency_contact_phone: column(row, "emergency_contact_phone")?,
            emergency_contact_relationship: column(row, "emergency_contact_relationship")?,
            move_in_date: column(row, "move_in_date")?,
            move_out_date: column(row, "move_out_date")?,
            notes: column(row, "notes")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    async fn scalar_count(&self, query: &str, bind: Option<i64>) -> Result<u64, DomainError> {
        let mut q = sqlx::query(query);
        if let Some(value) = bind {
            q = q.bind(value);
        }
        let row = q
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count tenants", e))?;
        let total: i64 = column(&row, "total")?;
        Ok(total as u64)
    }
}

#[async_trait]
impl TenantRepository for MySqlTenantRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Tenant>, DomainError> {
        let query = format!("SELECT {} FROM tenants WHERE id = ?", TENANT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find tenant", e))?;
        row.as_ref().map(Self::row_to_tenant).transpose()
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Tenant>, DomainError> {
        let query = format!("SELECT {} FROM tenants WHERE user_id = ?", TENANT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find tenant by user", e))?;
        row.as_ref().map(Self::row_to_tenant).transpose()
    }

    async fn find_by_user_ids(&self, user_ids: &[i64]) -> Result<Vec<Tenant>, DomainError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM tenants WHERE user_id IN (", TENANT_COLUMNS));
        let mut ids = builder.separated(", ");
        for id in user_ids {
            ids.push_bind(*id);
        }
        ids.push_unseparated(") ORDER BY id");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find tenants by users", e))?;
        rows.iter().map(Self::row_to_tenant).collect()
    }

    async fn find_page(&self, page: &PageRequest) -> Result<Page<Tenant>, DomainError> {
        let total = self
            .scalar_count("SELECT COUNT(*) AS total FROM tenants", None)
            .await?;

        let query = format!(
            "SELECT {} FROM tenants{}",
            TENANT_COLUMNS,
            order_and_limit(page, SORT_COLUMNS, "created_at")
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list tenants", e))?;
        let items = rows
            .iter()
            .map(Self::row_to_tenant)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, page, total))
    }

    async fn create(&self, mut tenant: Tenant) -> Result<Tenant, DomainError> {
        let query = r#"
            INSERT INTO tenants (
                user_id, property_id, property_address, unit_number, rent_amount,
                security_deposit, lease_start_date, lease_end_date, status,
                emergency_contact_name, emergency_contact_phone, emergency_contact_relationship,
                move_in_date, move_out_date, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(tenant.user_id)
            .bind(tenant.property_id)
            .bind(&tenant.property_address)
            .bind(&tenant.unit_number)
            .bind(tenant.rent_amount)
            .bind(tenant.security_deposit)
            .bind(tenant.lease_start_date)
            .bind(tenant.lease_end_date)
            .bind(tenant.status.as_str())
            .bind(&tenant.emergency_contact_name)
            .bind(&tenant.emergency_contact_phone)
            .bind(&tenant.emergency_contact_relationship)
            .bind(tenant.move_in_date)
            .bind(tenant.move_out_date)
            .bind(&tenant.notes)
            .bind(tenant.created_at)
            .bind(tenant.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create tenant", e))?;

        tenant.id = result.last_insert_id() as i64;
        Ok(tenant)
    }

    async fn update(&self, tenant: Tenant) -> Result<Tenant, DomainError> {
        let query = r#"
            UPDATE tenants SET
                property_id = ?, property_address = ?, unit_number = ?, rent_amount = ?,
                security_deposit = ?, lease_start_date = ?, lease_end_date = ?, status = ?,
                emergency_contact_name = ?, emergency_contact_phone = ?,
                emergency_contact_relationship = ?, move_in_date = ?, move_out_date = ?,
                notes = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(tenant.property_id)
            .bind(&tenant.property_address)
            .bind(&tenant.unit_number)
            .bind(tenant.rent_amount)
            .bind(tenant.security_deposit)
            .bind(tenant.lease_start_date)
            .bind(tenant.lease_end_date)
            .bind(tenant.status.as_str())
            .bind(&tenant.emergency_contact_name)
            .bind(&tenant.emergency_contact_phone)
            .bind(&tenant.emergency_contact_relationship)
            .bind(tenant.move_in_date)
            .bind(tenant.move_out_date)
            .bind(&tenant.notes)
            .bind(tenant.updated_at)
            .bind(tenant.id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update tenant", e))?;

        if result.rows_affected() == 0 && !self.exists(tenant.id).await? {
            return Err(DomainError::not_found("Tenant"));
        }
        Ok(tenant)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM tenants WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete tenant", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        let total = self
            .scalar_count("SELECT COUNT(*) AS total FROM tenants WHERE id = ?", Some(id))
            .await?;
        Ok(total > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        self.scalar_count("SELECT COUNT(*) AS total FROM tenants", None)
            .await
    }

    async fn count_by_property(&self, property_id: i64) -> Result<u64, DomainError> {
        self.scalar_count(
            "SELECT COUNT(*) AS total FROM tenants WHERE property_id = ?",
            Some(property_id),
        )
        .await
    }
}

//! MySQL implementation of the LeaseRepository trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use nbj_core::domain::entities::lease::{LeaseAgreement, LeaseStatus};
use nbj_core::errors::DomainError;
use nbj_core::repositories::LeaseRepository;

use super::{column, db_error, enum_column};

const LEASE_COLUMNS: &str = "id, tenant_id, start_date, end_date, monthly_rent, security_deposit, \
     status, lease_document_path, lease_document_name, signed_document_path, signed_document_name, \
     is_renewal, previous_lease_id, renewal_notice_sent, renewal_notice_date, tenant_signed_date, \
     admin_signed_date, lease_terms, special_conditions, notes, created_at, updated_at";

pub struct MySqlLeaseRepository {
    pool: MySqlPool,
}

impl MySqlLeaseRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_lease(row: &MySqlRow) -> Result<LeaseAgreement, DomainError> {
        Ok(LeaseAgreement {
            id: column(row, "id")?,
            tenant_id: column(row, "tenant_id")?,
            start_date: column(row, "start_date")?,
            end_date: column(row, "end_date")?,
            monthly_rent: column(row, "monthly_rent")?,
            security_deposit: column(row, "security_deposit")?,
            status: enum_column(row, "status")?,
            lease_document_path: column(row, "lease_document_path")?,
            lease_document_name: column(row, "lease_document_name")?,
            signed_document_path: column(row, "signed_document_path")?,
            signed_document_name: column(row, "signed_document_name")?,
            is_renewal: column(row, "is_renewal")?,
            previous_lease_id: column(row, "previous_lease_id")?,
            renewal_notice_sent: column(row, "renewal_notice_sent")?,
            renewal_notice_date: column(row, "renewal_notice_date")?,
            tenant_signed_date: column(row, "tenant_signed_date")?,
            admin_signed_date: column(row, "admin_signed_date")?,
            lease_terms: column(row, "lease_terms")?,
            special_conditions: column(row, "special_conditions")?,
            notes: column(row, "notes")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    fn collect(rows: Vec<MySqlRow>) -> Result<Vec<LeaseAgreement>, DomainError> {
        rows.iter().map(Self::row_to_lease).collect()
    }
}

#[async_trait]
impl LeaseRepository for MySqlLeaseRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<LeaseAgreement>, DomainError> {
        let query = format!("SELECT {} FROM lease_agreements WHERE id = ?", LEASE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find lease", e))?;
        row.as_ref().map(Self::row_to_lease).transpose()
    }

    async fn find_by_tenant(&self, tenant_id: i64) -> Result<Vec<LeaseAgreement>, DomainError> {
        let query = format!(
            "SELECT {} FROM lease_agreements WHERE tenant_id = ? ORDER BY start_date DESC, id DESC",
            LEASE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list tenant leases", e))?;
        Self::collect(rows)
    }

    async fn find_by_status(
        &self,
        status: Option<LeaseStatus>,
    ) -> Result<Vec<LeaseAgreement>, DomainError> {
        let rows = match status {
            Some(status) => {
                let query = format!(
                    "SELECT {} FROM lease_agreements WHERE status = ? ORDER BY start_date DESC, id DESC",
                    LEASE_COLUMNS
                );
                sqlx::query(&query)
                    .bind(status.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {} FROM lease_agreements ORDER BY start_date DESC, id DESC",
                    LEASE_COLUMNS
                );
                sqlx::query(&query).fetch_all(&self.pool).await
            }
        }
        .map_err(|e| db_error("Failed to list leases", e))?;
        Self::collect(rows)
    }

    async fn find_expiring(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<LeaseAgreement>, DomainError> {
        let query = format!(
            "SELECT {} FROM lease_agreements WHERE status = ? AND end_date BETWEEN ? AND ? \
             ORDER BY end_date ASC, id ASC",
            LEASE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(LeaseStatus::Active.as_str())
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find expiring leases", e))?;
        Self::collect(rows)
    }

    async fn create(&self, mut lease: LeaseAgreement) -> Result<LeaseAgreement, DomainError> {
        let query = r#"
            INSERT INTO lease_agreements (
                tenant_id, start_date, end_date, monthly_rent, security_deposit, status,
                lease_document_path, lease_document_name, signed_document_path,
                signed_document_name, is_renewal, previous_lease_id, renewal_notice_sent,
                renewal_notice_date, tenant_signed_date, admin_signed_date, lease_terms,
                special_conditions, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(lease.tenant_id)
            .bind(lease.start_date)
            .bind(lease.end_date)
            .bind(lease.monthly_rent)
            .bind(lease.security_deposit)
            .bind(lease.status.as_str())
            .bind(&lease.lease_document_path)
            .bind(&lease.lease_document_name)
            .bind(&lease.signed_document_path)
            .bind(&lease.signed_document_name)
            .bind(lease.is_renewal)
            .bind(lease.previous_lease_id)
            .bind(lease.renewal_notice_sent)
            .bind(lease.renewal_notice_date)
            .bind(lease.tenant_signed_date)
            .bind(lease.admin_signed_date)
            .bind(&lease.lease_terms)
            .bind(&lease.special_conditions)
            .bind(&lease.notes)
            .bind(lease.created_at)
            .bind(lease.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create lease", e))?;

        lease.id = result.last_insert_id() as i64;
        Ok(lease)
    }

    async fn update(&self, lease: LeaseAgreement) -> Result<LeaseAgreement, DomainError> {
        let query = r#"
            UPDATE lease_agreements SET
                start_date = ?, end_date = ?, monthly_rent = ?, security_deposit = ?, status = ?,
                lease_document_path = ?, lease_document_name = ?, signed_document_path = ?,
                signed_document_name = ?, is_renewal = ?, previous_lease_id = ?,
                renewal_notice_sent = ?, renewal_notice_date = ?, tenant_signed_date = ?,
                admin_signed_date = ?, lease_terms = ?, special_conditions = ?, notes = ?,
                updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(lease.start_date)
            .bind(lease.end_date)
            .bind(lease.monthly_rent)
            .bind(lease.security_deposit)
            .bind(lease.status.as_str())
            .bind(&lease.lease_document_path)
            .bind(&lease.lease_document_name)
            .bind(&lease.signed_document_path)
            .bind(&lease.signed_document_name)
            .bind(lease.is_renewal)
            .bind(lease.previous_lease_id)
            .bind(lease.renewal_notice_sent)
            .bind(lease.renewal_notice_date)
            .bind(lease.tenant_signed_date)
            .bind(lease.admin_signed_date)
            .bind(&lease.lease_terms)
            .bind(&lease.special_conditions)
            .bind(&lease.notes)
            .bind(lease.updated_at)
            .bind(lease.id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update lease", e))?;

        if result.rows_affected() == 0 && self.find_by_id(lease.id).await?.is_none() {
            return Err(DomainError::not_found("Lease agreement"));
        }
        Ok(lease)
    }

    async fn count_by_status(&self, status: LeaseStatus) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM lease_agreements WHERE status = ?")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count leases", e))?;
        let total: i64 = column(&row, "total")?;
        Ok(total as u64)
    }
}

//! MySQL implementation of the PaymentRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};

use nbj_core::domain::entities::payment::Payment;
use nbj_core::errors::DomainError;
use nbj_core::repositories::{PaymentFilter, PaymentRepository};
use nbj_shared::{Page, PageRequest};

use super::{column, db_error, enum_column, optional_enum_column, order_and_limit};

const PAYMENT_COLUMNS: &str = "id, tenant_id, lease_agreement_id, amount, late_fee, discount_amount, \
     total_amount, due_date, payment_date, status, payment_type, payment_method, transaction_id, \
     reference_number, payment_period_start, payment_period_end, notes, processed_by, \
     processed_at, created_at, updated_at";

const SORT_COLUMNS: &[(&str, &str)] = &[
    ("id", "id"),
    ("amount", "amount"),
    ("totalAmount", "total_amount"),
    ("dueDate", "due_date"),
    ("paymentDate", "payment_date"),
    ("status", "status"),
    ("createdAt", "created_at"),
];

/// MySQL implementation of PaymentRepository
pub struct MySqlPaymentRepository {
    pool: MySqlPool,
}

impl MySqlPaymentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_payment(row: &MySqlRow) -> Result<Payment, DomainError> {
        Ok(Payment {
            id: column(row, "id")?,
            tenant_id: column(row, "tenant_id")?,
            lease_agreement_id: column(row, "lease_agreement_id")?,
            amount: column(row, "amount")?,
            late_fee: column(row, "late_fee")?,
            discount_amount: column(row, "discount_amount")?,
            total_amount: column(row, "total_amount")?,
            due_date: column(row, "due_date")?,
            payment_date: column(row, "payment_date")?,
            status: enum_column(row, "status")?,
            payment_type: enum_column(row, "payment_type")?,
            payment_method: optional_enum_column(row, "payment_method")?,
            transaction_id: column(row, "transaction_id")?,
            reference_number: column(row, "reference_number")?,
            payment_period_start: column(row, "payment_period_start")?,
            payment_period_end: column(row, "payment_period_end")?,
            notes: column(row, "notes")?,
            processed_by: column(row, "processed_by")?,
            processed_at: column(row, "processed_at")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    /// Appends the WHERE clause for a search; the caller has already
    /// rejected an empty tenant id list
    fn push_filter(builder: &mut QueryBuilder<'_, MySql>, filter: &PaymentFilter) {
        let mut joiner = " WHERE ";
        if let Some(ids) = &filter.tenant_ids {
            builder.push(joiner).push("tenant_id IN (");
            let mut list = builder.separated(", ");
            for id in ids {
                list.push_bind(*id);
            }
            list.push_unseparated(")");
            joiner = " AND ";
        }
        if let Some(status) = filter.status {
            builder.push(joiner).push("status = ").push_bind(status.as_str());
            joiner = " AND ";
        }
        if let Some(start) = filter.start_date {
            builder.push(joiner).push("payment_date >= ").push_bind(start);
            joiner = " AND ";
        }
        if let Some(end) = filter.end_date {
            builder.push(joiner).push("payment_date <= ").push_bind(end);
        }
    }
}

#[async_trait]
impl PaymentRepository for MySqlPaymentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Payment>, DomainError> {
        let query = format!("SELECT {} FROM payments WHERE id = ?", PAYMENT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find payment", e))?;
        row.as_ref().map(Self::row_to_payment).transpose()
    }

    async fn search(
        &self,
        filter: &PaymentFilter,
        page: &PageRequest,
    ) -> Result<Page<Payment>, DomainError> {
        if filter.tenant_ids.as_ref().is_some_and(|ids| ids.is_empty()) {
            return Ok(Page::new(Vec::new(), page, 0));
        }

        let mut count: QueryBuilder<MySql> =
            QueryBuilder::new("SELECT COUNT(*) AS total FROM payments");
        Self::push_filter(&mut count, filter);
        let row = count
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count payments", e))?;
        let total: i64 = column(&row, "total")?;

        let mut select: QueryBuilder<MySql> =
            QueryBuilder::new(format!("SELECT {} FROM payments", PAYMENT_COLUMNS));
        Self::push_filter(&mut select, filter);
        select.push(order_and_limit(page, SORT_COLUMNS, "payment_date"));
        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to search payments", e))?;
        let items = rows
            .iter()
            .map(Self::row_to_payment)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(items, page, total as u64))
    }

    async fn find_by_tenant(&self, tenant_id: i64) -> Result<Vec<Payment>, DomainError> {
        let query = format!(
            "SELECT {} FROM payments WHERE tenant_id = ? ORDER BY due_date DESC, id DESC",
            PAYMENT_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list tenant payments", e))?;
        rows.iter().map(Self::row_to_payment).collect()
    }

    async fn create(&self, mut payment: Payment) -> Result<Payment, DomainError> {
        let query = r#"
            INSERT INTO payments (
                tenant_id, lease_agreement_id, amount, late_fee, discount_amount, total_amount,
                due_date, payment_date, status, payment_type, payment_method, transaction_id,
                reference_number, payment_period_start, payment_period_end, notes,
                processed_by, processed_at, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(payment.tenant_id)
            .bind(payment.lease_agreement_id)
            .bind(payment.amount)
            .bind(payment.late_fee)
            .bind(payment.discount_amount)
            .bind(payment.total_amount)
            .bind(payment.due_date)
            .bind(payment.payment_date)
            .bind(payment.status.as_str())
            .bind(payment.payment_type.as_str())
            .bind(payment.payment_method.map(|m| m.as_str()))
            .bind(&payment.transaction_id)
            .bind(&payment.reference_number)
            .bind(payment.payment_period_start)
            .bind(payment.payment_period_end)
            .bind(&payment.notes)
            .bind(&payment.processed_by)
            .bind(payment.processed_at)
            .bind(payment.created_at)
            .bind(payment.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create payment", e))?;

        payment.id = result.last_insert_id() as i64;
        Ok(payment)
    }

    async fn update(&self, payment: Payment) -> Result<Payment, DomainError> {
        let query = r#"
            UPDATE payments SET
                lease_agreement_id = ?, amount = ?, late_fee = ?, discount_amount = ?,
                total_amount = ?, due_date = ?, payment_date = ?, status = ?, payment_type = ?,
                payment_method = ?, transaction_id = ?, reference_number = ?,
                payment_period_start = ?, payment_period_end = ?, notes = ?, processed_by = ?,
                processed_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(payment.lease_agreement_id)
            .bind(payment.amount)
            .bind(payment.late_fee)
            .bind(payment.discount_amount)
            .bind(payment.total_amount)
            .bind(payment.due_date)
            .bind(payment.payment_date)
            .bind(payment.status.as_str())
            .bind(payment.payment_type.as_str())
            .bind(payment.payment_method.map(|m| m.as_str()))
            .bind(&payment.transaction_id)
            .bind(&payment.reference_number)
            .bind(payment.payment_period_start)
            .bind(payment.payment_period_end)
            .bind(&payment.notes)
            .bind(&payment.processed_by)
            .bind(payment.processed_at)
            .bind(payment.updated_at)
            .bind(payment.id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update payment", e))?;

        if result.rows_affected() == 0 && self.find_by_id(payment.id).await?.is_none() {
            return Err(DomainError::not_found("Payment"));
        }
        Ok(payment)
    }
}

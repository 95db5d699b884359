use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use nbj_core::entities::{Payment, PaymentMethod, PaymentStatus, PaymentType};
use nbj_core::services::{NewPayment, PaymentHistoryEntry, PaymentHistoryQuery};
use nbj_shared::{Page, PageRequest, SortDirection};

use super::maintenance::{parse_field, parse_optional};
use crate::handlers::ApiError;

const DEFAULT_SORT: &str = "paymentDate";

/// Query for `GET /admin/payments/history`
///
/// `sort=field,dir` is accepted as an alternative to `sortBy`/`sortDir`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistoryParams {
    pub tenant_name: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
    pub sort: Option<String>,
}

impl PaymentHistoryParams {
    fn page_request(&self) -> PageRequest {
        let (field, dir) = match self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(sort) => match sort.split_once(',') {
                Some((field, dir)) => (Some(field), Some(dir)),
                None => (Some(sort), None),
            },
            None => (self.sort_by.as_deref(), self.sort_dir.as_deref()),
        };

        let request = PageRequest::new(self.page.unwrap_or(0), self.size.unwrap_or(10));
        let field = field.map(str::trim).filter(|f| !f.is_empty()).unwrap_or(DEFAULT_SORT);
        let dir = dir.map(SortDirection::parse).unwrap_or(SortDirection::Desc);
        request.sorted_by(field, dir)
    }
}

impl TryFrom<PaymentHistoryParams> for PaymentHistoryQuery {
    type Error = ApiError;

    fn try_from(params: PaymentHistoryParams) -> Result<Self, Self::Error> {
        Ok(Self {
            page: params.page_request(),
            status: parse_optional::<PaymentStatus>(params.status.as_deref())?,
            tenant_name: params.tenant_name.filter(|n| !n.trim().is_empty()),
            start_date: params.start_date,
            end_date: params.end_date,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistoryDto {
    pub id: i64,
    pub tenant_id: i64,
    pub tenant_name: Option<String>,
    pub amount: Decimal,
    pub late_fee: Decimal,
    pub total_amount: Decimal,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub status: String,
    pub payment_type: String,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub property_address: Option<String>,
    pub unit_number: Option<String>,
}

impl From<PaymentHistoryEntry> for PaymentHistoryDto {
    fn from(entry: PaymentHistoryEntry) -> Self {
        let payment = entry.payment;
        Self {
            id: payment.id,
            tenant_id: payment.tenant_id,
            tenant_name: entry.tenant_name,
            amount: payment.amount,
            late_fee: payment.late_fee,
            total_amount: payment.total_amount,
            due_date: payment.due_date,
            payment_date: payment.payment_date,
            status: payment.status.to_string(),
            payment_type: payment.payment_type.to_string(),
            payment_method: payment.payment_method.map(|m| m.to_string()),
            transaction_id: payment.transaction_id,
            property_address: entry.property_address,
            unit_number: entry.unit_number,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistoryResponse {
    pub payments: Vec<PaymentHistoryDto>,
    pub current_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub page_size: u32,
}

impl From<Page<PaymentHistoryEntry>> for PaymentHistoryResponse {
    fn from(page: Page<PaymentHistoryEntry>) -> Self {
        let page = page.map(PaymentHistoryDto::from);
        Self {
            payments: page.items,
            current_page: page.page,
            total_items: page.total_items,
            total_pages: page.total_pages,
            page_size: page.size,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    #[validate(range(min = 1))]
    pub tenant_id: i64,
    pub lease_agreement_id: Option<i64>,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    #[serde(default = "default_payment_type")]
    pub payment_type: String,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

fn default_payment_type() -> String {
    PaymentType::Rent.to_string()
}

impl TryFrom<CreatePaymentRequest> for NewPayment {
    type Error = ApiError;

    fn try_from(request: CreatePaymentRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            payment_type: parse_field::<PaymentType>(&request.payment_type)?,
            tenant_id: request.tenant_id,
            lease_agreement_id: request.lease_agreement_id,
            amount: request.amount,
            due_date: request.due_date,
            period_start: request.period_start,
            period_end: request.period_end,
            notes: request.notes,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkPaidRequest {
    pub payment_method: String,
    pub transaction_id: Option<String>,
}

impl MarkPaidRequest {
    pub fn method(&self) -> Result<PaymentMethod, ApiError> {
        parse_field::<PaymentMethod>(&self.payment_method)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LateFeeRequest {
    /// Flat fraction of the amount charged once the grace period has passed, e.g. 0.05
    pub rate: Decimal,
    #[validate(range(min = 0, max = 60))]
    #[serde(default)]
    pub grace_period_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: i64,
    pub tenant_id: i64,
    pub lease_agreement_id: Option<i64>,
    pub amount: Decimal,
    pub late_fee: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub status: String,
    pub payment_type: String,
    pub payment_method: Option<String>,
    pub transaction_id: Option<String>,
    pub payment_period_start: Option<NaiveDate>,
    pub payment_period_end: Option<NaiveDate>,
    pub notes: Option<String>,
    pub processed_by: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Payment> for PaymentDto {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            tenant_id: payment.tenant_id,
            lease_agreement_id: payment.lease_agreement_id,
            amount: payment.amount,
            late_fee: payment.late_fee,
            discount_amount: payment.discount_amount,
            total_amount: payment.total_amount,
            due_date: payment.due_date,
            payment_date: payment.payment_date,
            status: payment.status.to_string(),
            payment_type: payment.payment_type.to_string(),
            payment_method: payment.payment_method.map(|m| m.to_string()),
            transaction_id: payment.transaction_id,
            payment_period_start: payment.payment_period_start,
            payment_period_end: payment.payment_period_end,
            notes: payment.notes,
            processed_by: payment.processed_by,
            processed_at: payment.processed_at,
            created_at: payment.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sort_is_payment_date_desc() {
        let query = PaymentHistoryQuery::try_from(PaymentHistoryParams::default()).unwrap();
        assert_eq!(query.page.sort_by, "paymentDate");
        assert_eq!(query.page.sort_dir, SortDirection::Desc);
    }

    #[test]
    fn test_combined_sort_parameter_wins() {
        let params = PaymentHistoryParams {
            sort: Some("dueDate,asc".to_string()),
            sort_by: Some("amount".to_string()),
            ..Default::default()
        };
        let query = PaymentHistoryQuery::try_from(params).unwrap();
        assert_eq!(query.page.sort_by, "dueDate");
        assert_eq!(query.page.sort_dir, SortDirection::Asc);
    }

    #[test]
    fn test_unknown_status_rejected() {
        let params = PaymentHistoryParams {
            status: Some("LOST".to_string()),
            ..Default::default()
        };
        assert!(PaymentHistoryQuery::try_from(params).is_err());
    }
}

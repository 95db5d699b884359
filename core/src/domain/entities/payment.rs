//! Rent and other charges owed by a tenant.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Partial,
    Failed,
    Cancelled,
    Refunded,
}

text_enum!(PaymentStatus {
    Pending => "PENDING",
    Completed => "COMPLETED",
    Partial => "PARTIAL",
    Failed => "FAILED",
    Cancelled => "CANCELLED",
    Refunded => "REFUNDED",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Rent,
    SecurityDeposit,
    LateFee,
    Utility,
    Maintenance,
    Other,
}

text_enum!(PaymentType {
    Rent => "RENT",
    SecurityDeposit => "SECURITY_DEPOSIT",
    LateFee => "LATE_FEE",
    Utility => "UTILITY",
    Maintenance => "MAINTENANCE",
    Other => "OTHER",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Cash,
    Check,
    BankTransfer,
    CreditCard,
    DebitCard,
    OnlinePayment,
    MobilePayment,
}

text_enum!(PaymentMethod {
    Cash => "CASH",
    Check => "CHECK",
    BankTransfer => "BANK_TRANSFER",
    CreditCard => "CREDIT_CARD",
    DebitCard => "DEBIT_CARD",
    OnlinePayment => "ONLINE_PAYMENT",
    MobilePayment => "MOBILE_PAYMENT",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub tenant_id: i64,
    pub lease_agreement_id: Option<i64>,
    pub amount: Decimal,
    pub late_fee: Decimal,
    pub discount_amount: Decimal,

    /// Always `amount + late_fee - discount_amount`
    pub total_amount: Decimal,

    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub payment_type: PaymentType,
    pub payment_method: Option<PaymentMethod>,
    pub transaction_id: Option<String>,
    pub reference_number: Option<String>,
    pub payment_period_start: Option<NaiveDate>,
    pub payment_period_end: Option<NaiveDate>,
    pub notes: Option<String>,
    pub processed_by: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a PENDING payment
    pub fn new(tenant_id: i64, amount: Decimal, due_date: NaiveDate, payment_type: PaymentType) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            tenant_id,
            lease_agreement_id: None,
            amount,
            late_fee: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            total_amount: amount,
            due_date,
            payment_date: None,
            status: PaymentStatus::Pending,
            payment_type,
            payment_method: None,
            transaction_id: None,
            reference_number: None,
            payment_period_start: None,
            payment_period_end: None,
            notes: None,
            processed_by: None,
            processed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    fn recalculate_total(&mut self) {
        self.total_amount = self.amount + self.late_fee - self.discount_amount;
        self.updated_at = Utc::now();
    }

    fn append_note(&mut self, line: String) {
        self.notes = Some(match self.notes.take() {
            Some(notes) if !notes.is_empty() => format!("{}\n{}", notes, line),
            _ => line,
        });
    }

    /// Still pending after the due date
    pub fn is_overdue(&self) -> bool {
        self.status == PaymentStatus::Pending && Self::today() > self.due_date
    }

    pub fn days_overdue(&self) -> i64 {
        if !self.is_overdue() {
            return 0;
        }
        (Self::today() - self.due_date).num_days()
    }

    /// Flat `amount * rate` rounded half-up to cents once the grace period
    /// has passed, zero otherwise. `rate` must lie in `0..=1`.
    pub fn calculate_late_fee(&self, rate: Decimal, grace_period_days: i64) -> DomainResult<Decimal> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(DomainError::validation("Late fee rate must be between 0 and 1"));
        }
        if !self.is_overdue() || self.days_overdue() <= grace_period_days {
            return Ok(Decimal::ZERO);
        }
        let fee = self
            .amount
            .checked_mul(rate)
            .ok_or_else(|| DomainError::validation("Late fee is out of range"))?;
        Ok(fee.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn apply_late_fee(&mut self, late_fee: Decimal) {
        self.late_fee = late_fee;
        self.recalculate_total();
    }

    pub fn apply_discount(&mut self, discount: Decimal) {
        self.discount_amount = discount;
        self.recalculate_total();
    }

    pub fn can_be_modified(&self) -> bool {
        matches!(self.status, PaymentStatus::Pending | PaymentStatus::Partial)
    }

    pub fn mark_as_paid(
        &mut self,
        method: PaymentMethod,
        transaction_id: Option<String>,
        processed_by: impl Into<String>,
    ) -> DomainResult<()> {
        if !self.can_be_modified() {
            return Err(DomainError::business_rule(format!(
                "Payment in status {} cannot be marked as paid",
                self.status
            )));
        }
        let now = Utc::now();
        self.status = PaymentStatus::Completed;
        self.payment_date = Some(now.date_naive());
        self.payment_method = Some(method);
        self.transaction_id = transaction_id;
        self.processed_by = Some(processed_by.into());
        self.processed_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    pub fn mark_as_failed(&mut self, reason: &str) {
        self.status = PaymentStatus::Failed;
        self.append_note(format!("Payment failed: {}", reason));
        self.updated_at = Utc::now();
    }

    pub fn cancel(&mut self, reason: &str) {
        self.status = PaymentStatus::Cancelled;
        self.append_note(format!("Payment cancelled: {}", reason));
        self.updated_at = Utc::now();
    }
}

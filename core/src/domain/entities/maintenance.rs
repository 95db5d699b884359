//! Maintenance request raised by a tenant and worked by the property manager.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    Pending,
    Approved,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
    OnHold,
}

text_enum!(MaintenanceStatus {
    Pending => "PENDING",
    Approved => "APPROVED",
    Assigned => "ASSIGNED",
    InProgress => "IN_PROGRESS",
    Completed => "COMPLETED",
    Cancelled => "CANCELLED",
    OnHold => "ON_HOLD",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenancePriority {
    Low,
    Medium,
    High,
    Urgent,
    Emergency,
}

text_enum!(MaintenancePriority {
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
    Urgent => "URGENT",
    Emergency => "EMERGENCY",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceCategory {
    Plumbing,
    Electrical,
    Hvac,
    Appliances,
    Flooring,
    Painting,
    DoorsWindows,
    Security,
    PestControl,
    Cleaning,
    Landscaping,
    Other,
}

text_enum!(MaintenanceCategory {
    Plumbing => "PLUMBING",
    Electrical => "ELECTRICAL",
    Hvac => "HVAC",
    Appliances => "APPLIANCES",
    Flooring => "FLOORING",
    Painting => "PAINTING",
    DoorsWindows => "DOORS_WINDOWS",
    Security => "SECURITY",
    PestControl => "PEST_CONTROL",
    Cleaning => "CLEANING",
    Landscaping => "LANDSCAPING",
    Other => "OTHER",
});

/// Admin override of a request's workflow fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: Option<MaintenanceStatus>,
    pub assigned_to: Option<String>,
    pub admin_notes: Option<String>,
    pub scheduled_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceRequest {
    pub id: i64,
    pub tenant_id: i64,
    pub title: String,
    pub description: String,
    pub category: MaintenanceCategory,
    pub priority: MaintenancePriority,
    pub status: MaintenanceStatus,
    pub location_details: Option<String>,
    pub preferred_contact_method: Option<String>,
    pub preferred_time: Option<String>,
    pub tenant_available: bool,
    pub estimated_cost: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    pub assigned_to: Option<String>,
    pub assigned_at: Option<DateTime<Utc>>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub admin_notes: Option<String>,
    pub tenant_feedback: Option<String>,
    pub tenant_rating: Option<i32>,
    pub resolution_summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRequest {
    /// Creates a PENDING request
    pub fn new(
        tenant_id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        category: MaintenanceCategory,
        priority: MaintenancePriority,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            tenant_id,
            title: title.into(),
            description: description.into(),
            category,
            priority,
            status: MaintenanceStatus::Pending,
            location_details: None,
            preferred_contact_method: None,
            preferred_time: None,
            tenant_available: true,
            estimated_cost: None,
            actual_cost: None,
            assigned_to: None,
            assigned_at: None,
            scheduled_date: None,
            started_at: None,
            completed_at: None,
            admin_notes: None,
            tenant_feedback: None,
            tenant_rating: None,
            resolution_summary: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MaintenanceStatus::Completed
    }

    pub fn is_in_progress(&self) -> bool {
        self.status == MaintenanceStatus::InProgress
    }

    pub fn can_be_assigned(&self) -> bool {
        matches!(
            self.status,
            MaintenanceStatus::Pending | MaintenanceStatus::Approved
        )
    }

    pub fn can_be_started(&self) -> bool {
        self.status == MaintenanceStatus::Assigned && self.assigned_to.is_some()
    }

    pub fn can_be_completed(&self) -> bool {
        self.status == MaintenanceStatus::InProgress
    }

    /// Scheduled in the past and not yet completed
    pub fn is_overdue(&self) -> bool {
        match self.scheduled_date {
            Some(date) => !self.is_completed() && date < Utc::now(),
            None => false,
        }
    }

    /// Hours between start and completion, 0 until both are known
    pub fn hours_to_complete(&self) -> i64 {
        match (self.started_at, self.completed_at) {
            (Some(start), Some(end)) => (end - start).num_hours(),
            _ => 0,
        }
    }

    fn transition_error(&self, action: &str) -> DomainError {
        DomainError::business_rule(format!(
            "Cannot {} a maintenance request in status {}",
            action, self.status
        ))
    }

    /// PENDING/APPROVED → ASSIGNED
    pub fn assign_to(&mut self, assignee: impl Into<String>) -> DomainResult<()> {
        if !self.can_be_assigned() {
            return Err(self.transition_error("assign"));
        }
        let assignee = assignee.into();
        if assignee.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "assignedTo".to_string(),
            }
            .into());
        }
        let now = Utc::now();
        self.assigned_to = Some(assignee);
        self.assigned_at = Some(now);
        self.status = MaintenanceStatus::Assigned;
        self.updated_at = now;
        Ok(())
    }

    /// ASSIGNED (with an assignee) → IN_PROGRESS
    pub fn start(&mut self) -> DomainResult<()> {
        if !self.can_be_started() {
            return Err(self.transition_error("start"));
        }
        let now = Utc::now();
        self.status = MaintenanceStatus::InProgress;
        self.started_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// IN_PROGRESS → COMPLETED
    pub fn complete(
        &mut self,
        resolution_summary: Option<String>,
        actual_cost: Option<Decimal>,
    ) -> DomainResult<()> {
        if !self.can_be_completed() {
            return Err(self.transition_error("complete"));
        }
        let now = Utc::now();
        self.status = MaintenanceStatus::Completed;
        self.completed_at = Some(now);
        self.resolution_summary = resolution_summary;
        self.actual_cost = actual_cost;
        self.updated_at = now;
        Ok(())
    }

    /// Any status → CANCELLED; the reason is appended to the admin notes
    pub fn cancel(&mut self, reason: &str) {
        let line = format!("Cancelled: {}", reason);
        self.admin_notes = Some(match self.admin_notes.take() {
            Some(notes) if !notes.is_empty() => format!("{}\n{}", notes, line),
            _ => line,
        });
        self.status = MaintenanceStatus::Cancelled;
        self.updated_at = Utc::now();
    }

    /// Records tenant feedback; only allowed once the work is COMPLETED
    pub fn add_feedback(&mut self, feedback: Option<String>, rating: Option<i32>) -> DomainResult<()> {
        if !self.is_completed() {
            return Err(ValidationError::InvalidStatus {
                message: "Can only provide feedback on completed requests".to_string(),
            }
            .into());
        }
        if let Some(rating) = rating {
            if !(1..=5).contains(&rating) {
                return Err(ValidationError::InvalidRating.into());
            }
            self.tenant_rating = Some(rating);
        }
        if let Some(feedback) = feedback {
            self.tenant_feedback = Some(feedback);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Applies an admin override; the status is set as given and
    /// `completed_at` is stamped the first time it becomes COMPLETED
    pub fn apply_status_update(&mut self, update: StatusUpdate) {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(assignee) = update.assigned_to {
            if self.assigned_at.is_none() {
                self.assigned_at = Some(Utc::now());
            }
            self.assigned_to = Some(assignee);
        }
        if let Some(notes) = update.admin_notes {
            self.admin_notes = Some(notes);
        }
        if let Some(date) = update.scheduled_date {
            self.scheduled_date = Some(date);
        }
        if self.status == MaintenanceStatus::Completed && self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
        self.updated_at = Utc::now();
    }
}

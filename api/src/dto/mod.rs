//! Request and response bodies
//!
//! Entities are converted into these camelCase shapes at the HTTP
//! boundary; nothing here carries business rules.

pub mod auth;
pub mod dashboard;
pub mod file;
pub mod lease;
pub mod maintenance;
pub mod payment;
pub mod property;
pub mod stripe;
pub mod tenant;

use serde::{Deserialize, Serialize};

use nbj_shared::PageRequest;

/// `page`, `size`, `sortBy` and `sortDir` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl PageQuery {
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::from_parts(
            self.page,
            self.size,
            self.sort_by.as_deref(),
            self.sort_dir.as_deref(),
        )
    }
}

/// Envelope used by the maintenance mutations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ActionResponse<T> {
    pub fn new(message: impl Into<String>, request: Option<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            request,
            timestamp: chrono::Utc::now(),
        }
    }
}

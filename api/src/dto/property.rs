use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use nbj_core::services::{PropertyInput, PropertySummary};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRequest {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Address is required"))]
    pub address: String,

    #[validate(url(message = "Map link must be a URL"))]
    pub map_link: Option<String>,

    #[validate(length(max = 100))]
    pub manager_owner_name: Option<String>,

    #[validate(range(min = 0, message = "Number of units must not be negative"))]
    pub number_of_units: i32,
}

impl From<PropertyRequest> for PropertyInput {
    fn from(request: PropertyRequest) -> Self {
        Self {
            name: request.name,
            address: request.address,
            map_link: request.map_link.filter(|l| !l.trim().is_empty()),
            manager_owner_name: request.manager_owner_name,
            number_of_units: request.number_of_units,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDto {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub map_link: Option<String>,
    pub manager_owner_name: Option<String>,
    pub number_of_units: i32,
    pub current_tenants_count: u64,
    pub vacancies_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PropertySummary> for PropertyDto {
    fn from(summary: PropertySummary) -> Self {
        let property = summary.property;
        Self {
            id: property.id,
            name: property.name,
            address: property.address,
            map_link: property.map_link,
            manager_owner_name: property.manager_owner_name,
            number_of_units: property.number_of_units,
            current_tenants_count: summary.current_tenants_count,
            vacancies_count: summary.vacancies_count,
            created_at: property.created_at,
            updated_at: property.updated_at,
        }
    }
}

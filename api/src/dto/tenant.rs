use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use nbj_core::services::{TenantDetails, TenantUpdate};
use nbj_shared::Page;

use super::auth::UserDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantDto {
    pub id: i64,
    pub user: Option<UserDto>,
    pub property_id: Option<i64>,
    pub property_address: String,
    pub unit_number: Option<String>,
    pub status: String,
    pub rent_amount: Option<Decimal>,
    pub lease_start_date: Option<NaiveDate>,
    pub lease_end_date: Option<NaiveDate>,
}

impl From<TenantDetails> for TenantDto {
    fn from(details: TenantDetails) -> Self {
        let tenant = details.tenant;
        Self {
            id: tenant.id,
            user: details.user.as_ref().map(UserDto::from),
            property_id: tenant.property_id,
            property_address: tenant.property_address,
            unit_number: tenant.unit_number,
            status: tenant.status.to_string(),
            rent_amount: tenant.rent_amount,
            lease_start_date: tenant.lease_start_date,
            lease_end_date: tenant.lease_end_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantListResponse {
    pub tenants: Vec<TenantDto>,
    pub current_page: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl From<Page<TenantDetails>> for TenantListResponse {
    fn from(page: Page<TenantDetails>) -> Self {
        let page = page.map(TenantDto::from);
        Self {
            tenants: page.items,
            current_page: page.page,
            total_items: page.total_items,
            total_pages: page.total_pages,
        }
    }
}

/// Partial update; absent fields are left as they are
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenantRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: Option<String>,
    #[validate(email(message = "Email must be valid"))]
    pub email: Option<String>,
    pub phone_number: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub property_address: Option<String>,
    pub status: Option<String>,
}

impl From<UpdateTenantRequest> for TenantUpdate {
    fn from(request: UpdateTenantRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone_number: request.phone_number,
            property_address: request.property_address,
            status: request.status,
        }
    }
}

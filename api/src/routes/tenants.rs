//! Tenant administration

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::tenant::{TenantDto, TenantListResponse, UpdateTenantRequest};
use crate::dto::PageQuery;
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tenants")
            .route("", web::get().to(list_tenants))
            .route("/{id}", web::get().to(get_tenant))
            .route("/{id}", web::put().to(update_tenant))
            .route("/{id}", web::delete().to(delete_tenant)),
    );
}

/// Handler for GET /api/tenants
///
/// Paged with `page`, `size`, `sortBy` and `sortDir`; each tenant carries
/// its user account.
async fn list_tenants(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
) -> ApiResult {
    auth.require_admin()?;
    let page = state.tenants.list(&query.to_page_request()).await?;
    Ok(HttpResponse::Ok().json(TenantListResponse::from(page)))
}

async fn get_tenant(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    auth.require_admin()?;
    let tenant = state.tenants.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(TenantDto::from(tenant)))
}

/// Handler for PUT /api/tenants/{id}
///
/// Only the fields present in the body change. `status` is ACTIVE when it
/// reads "ACTIVE" and INACTIVE otherwise.
async fn update_tenant(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<UpdateTenantRequest>,
) -> ApiResult {
    auth.require_admin()?;
    request.validate()?;
    let tenant = state
        .tenants
        .update(path.into_inner(), request.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(TenantDto::from(tenant)))
}

async fn delete_tenant(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    auth.require_admin()?;
    let id = path.into_inner();
    state.tenants.delete(id).await?;
    tracing::info!(tenant_id = id, admin_id = auth.user_id, "Tenant deleted");
    Ok(HttpResponse::NoContent().finish())
}

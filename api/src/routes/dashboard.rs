use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::dashboard::{AdminDashboardDto, TenantDashboardDto};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/dashboard")
            .route("/tenant", web::get().to(tenant_dashboard))
            .route("/admin", web::get().to(admin_dashboard)),
    );
}

/// Handler for GET /api/dashboard/tenant
///
/// Profile summary plus maintenance counts and the five most recent
/// requests.
async fn tenant_dashboard(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    auth.require_tenant()?;
    let dashboard = state.dashboard.tenant_dashboard(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(TenantDashboardDto::from(dashboard)))
}

async fn admin_dashboard(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    auth.require_admin()?;
    let dashboard = state.dashboard.admin_dashboard().await?;
    Ok(HttpResponse::Ok().json(AdminDashboardDto::from(dashboard)))
}

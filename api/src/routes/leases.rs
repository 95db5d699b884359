//! Lease agreements
//!
//! Admins draft, submit and activate leases under `/admin/leases`; tenants
//! read and sign their own under `/leases`.

use actix_web::{web, HttpResponse};
use validator::Validate;

use nbj_core::entities::LeaseAgreement;

use crate::app::AppState;
use crate::dto::lease::{CreateLeaseRequest, ExpiringQuery, LeaseDto, LeaseListQuery};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/leases")
            .route("", web::get().to(list_leases))
            .route("", web::post().to(create_lease))
            .route("/expiring", web::get().to(expiring_leases))
            .route("/{id}", web::get().to(get_lease))
            .route("/{id}/submit", web::put().to(submit_lease))
            .route("/{id}/activate", web::put().to(activate_lease))
            .route("/{id}/renewal-notice", web::put().to(send_renewal_notice)),
    )
    .service(
        web::scope("/leases")
            .route("/my", web::get().to(my_leases))
            .route("/{id}/sign", web::put().to(sign_lease)),
    );
}

async fn list_leases(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<LeaseListQuery>,
) -> ApiResult {
    auth.require_admin()?;
    let leases = state.leases.list_by_status(query.status()?).await?;
    Ok(HttpResponse::Ok().json(to_dtos(leases)))
}

/// Handler for POST /api/admin/leases
///
/// Creates a DRAFT lease; `previousLeaseId` marks it as a renewal.
async fn create_lease(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<CreateLeaseRequest>,
) -> ApiResult {
    auth.require_admin()?;
    request.validate()?;
    let lease = state.leases.create(request.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(LeaseDto::from(lease)))
}

async fn get_lease(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    auth.require_admin()?;
    let lease = state.leases.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LeaseDto::from(lease)))
}

async fn submit_lease(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    auth.require_admin()?;
    let lease = state.leases.submit_for_signature(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LeaseDto::from(lease)))
}

async fn activate_lease(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    auth.require_admin()?;
    let lease = state.leases.activate(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LeaseDto::from(lease)))
}

/// Handler for GET /api/admin/leases/expiring?days=30
async fn expiring_leases(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<ExpiringQuery>,
) -> ApiResult {
    auth.require_admin()?;
    query.validate()?;
    let leases = state.leases.expiring_within(query.days()).await?;
    Ok(HttpResponse::Ok().json(to_dtos(leases)))
}

async fn send_renewal_notice(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    auth.require_admin()?;
    let lease = state.leases.send_renewal_notice(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LeaseDto::from(lease)))
}

async fn my_leases(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    auth.require_tenant()?;
    let leases = state.leases.list_for_user(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(to_dtos(leases)))
}

/// Handler for PUT /api/leases/{id}/sign
///
/// Tenants sign their own leases, admins countersign any. The lease
/// becomes SIGNED once both dates are set.
async fn sign_lease(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    let lease = state
        .leases
        .sign(path.into_inner(), &auth.principal())
        .await?;
    Ok(HttpResponse::Ok().json(LeaseDto::from(lease)))
}

fn to_dtos(leases: Vec<LeaseAgreement>) -> Vec<LeaseDto> {
    leases.into_iter().map(LeaseDto::from).collect()
}

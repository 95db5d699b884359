//! Maintenance request workflow
//!
//! Tenants open and follow their own requests; admins triage and work
//! them. Ownership checks for the shared endpoints live in the service.

use actix_web::{http::header::CONTENT_TYPE, web, HttpRequest, HttpResponse};
use validator::Validate;

use nbj_core::entities::StatusUpdate;
use nbj_core::services::NewMaintenanceRequest;

use crate::app::AppState;
use crate::dto::file::{AttachmentDto, UploadQuery};
use crate::dto::maintenance::{
    AssignRequest, CancelRequest, CompleteRequest, CreateMaintenanceRequest, FeedbackRequest,
    MaintenanceListQuery, MaintenanceListResponse, MaintenanceRequestDto, UpdateStatusRequest,
};
use crate::dto::{ActionResponse, PageQuery};
use crate::handlers::{ApiError, ApiResult};
use crate::middleware::AuthContext;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/maintenance")
            .route("", web::get().to(list_requests))
            .route("", web::post().to(create_request))
            .route("/my-requests", web::get().to(my_requests))
            .route("/{id}", web::get().to(get_request))
            .route("/{id}", web::delete().to(delete_request))
            .route("/{id}/status", web::put().to(update_status))
            .route("/{id}/assign", web::put().to(assign_request))
            .route("/{id}/start", web::put().to(start_request))
            .route("/{id}/complete", web::put().to(complete_request))
            .route("/{id}/cancel", web::put().to(cancel_request))
            .route("/{id}/feedback", web::put().to(submit_feedback))
            .route("/{id}/files", web::post().to(upload_file)),
    );
}

/// Handler for GET /api/maintenance
///
/// Admin listing filtered by optional `status` and `priority`.
async fn list_requests(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<MaintenanceListQuery>,
) -> ApiResult {
    auth.require_admin()?;
    let filter = query.filter()?;
    let page = state.maintenance.list(&filter, &query.page_request()).await?;
    Ok(HttpResponse::Ok().json(MaintenanceListResponse::from(page)))
}

async fn my_requests(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PageQuery>,
) -> ApiResult {
    auth.require_tenant()?;
    let page = state
        .maintenance
        .list_for_tenant(auth.user_id, &query.to_page_request())
        .await?;
    Ok(HttpResponse::Ok().json(MaintenanceListResponse::from(page)))
}

async fn get_request(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    let details = state
        .maintenance
        .get(path.into_inner(), &auth.principal())
        .await?;
    Ok(HttpResponse::Ok().json(MaintenanceRequestDto::from(details)))
}

/// Handler for POST /api/maintenance
///
/// ## Errors
/// - 400 VALIDATION_ERROR: Title outside 5..=100 characters, description
///   over 1000, unknown category or priority
/// - 403 TENANT_NOT_FOUND: The caller has no tenant profile
async fn create_request(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<CreateMaintenanceRequest>,
) -> ApiResult {
    auth.require_tenant()?;
    request.validate()?;
    let command = NewMaintenanceRequest::try_from(request.into_inner())?;

    let created = state.maintenance.create(auth.user_id, command).await?;
    let details = state.maintenance.get(created.id, &auth.principal()).await?;
    Ok(HttpResponse::Created().json(ActionResponse::new(
        "Maintenance request created successfully",
        Some(MaintenanceRequestDto::from(details)),
    )))
}

/// Handler for PUT /api/maintenance/{id}/status
///
/// Admin override: the status is set as given, without the workflow
/// guards that assign/start/complete apply.
async fn update_status(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<UpdateStatusRequest>,
) -> ApiResult {
    auth.require_admin()?;
    let update = StatusUpdate::try_from(request.into_inner())?;
    let details = state.maintenance.update_status(path.into_inner(), update).await?;
    Ok(updated("Maintenance request updated successfully", details))
}

async fn assign_request(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<AssignRequest>,
) -> ApiResult {
    auth.require_admin()?;
    request.validate()?;
    let details = state
        .maintenance
        .assign(path.into_inner(), &request.assigned_to)
        .await?;
    Ok(updated("Maintenance request assigned successfully", details))
}

async fn start_request(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    auth.require_admin()?;
    let details = state.maintenance.start(path.into_inner()).await?;
    Ok(updated("Work started on maintenance request", details))
}

async fn complete_request(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: Option<web::Json<CompleteRequest>>,
) -> ApiResult {
    auth.require_admin()?;
    let request = request.map(web::Json::into_inner).unwrap_or_default();
    let details = state
        .maintenance
        .complete(path.into_inner(), request.resolution_summary, request.actual_cost)
        .await?;
    Ok(updated("Maintenance request completed successfully", details))
}

async fn cancel_request(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: Option<web::Json<CancelRequest>>,
) -> ApiResult {
    let request = request.map(web::Json::into_inner).unwrap_or_default();
    let details = state
        .maintenance
        .cancel(path.into_inner(), &request.reason, &auth.principal())
        .await?;
    Ok(updated("Maintenance request cancelled successfully", details))
}

/// Handler for PUT /api/maintenance/{id}/feedback
///
/// ## Errors
/// - 400 INVALID_STATUS: The request is not COMPLETED
/// - 400 INVALID_RATING: Rating outside 1..=5
/// - 403 ACCESS_DENIED: The request belongs to another tenant
async fn submit_feedback(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<FeedbackRequest>,
) -> ApiResult {
    auth.require_tenant()?;
    request.validate()?;
    let FeedbackRequest {
        tenant_feedback,
        rating,
    } = request.into_inner();
    let details = state
        .maintenance
        .add_feedback(path.into_inner(), &auth.principal(), tenant_feedback, rating)
        .await?;
    Ok(updated("Feedback submitted successfully", details))
}

async fn delete_request(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    auth.require_admin()?;
    state.maintenance.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ActionResponse::<MaintenanceRequestDto>::new(
        "Maintenance request deleted successfully",
        None,
    )))
}

/// Handler for POST /api/maintenance/{id}/files?filename=...
///
/// The body is the raw file content; its type comes from the
/// `Content-Type` header.
async fn upload_file(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    query: web::Query<UploadQuery>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult {
    let filename = query
        .filename
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ApiError::bad_request("Query parameter 'filename' is required"))?;
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    let file = state
        .maintenance
        .attach_file(path.into_inner(), &auth.principal(), filename, content_type, &body)
        .await?;
    Ok(HttpResponse::Created().json(AttachmentDto::from(&file)))
}

fn updated(message: &str, details: nbj_core::services::MaintenanceDetails) -> HttpResponse {
    HttpResponse::Ok().json(ActionResponse::new(
        message,
        Some(MaintenanceRequestDto::from(details)),
    ))
}

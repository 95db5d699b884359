//! Property administration under `/admin/properties`

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::property::{PropertyDto, PropertyRequest};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/properties")
            .route("", web::get().to(list_properties))
            .route("", web::post().to(create_property))
            .route("/{id}", web::get().to(get_property))
            .route("/{id}", web::put().to(update_property))
            .route("/{id}", web::delete().to(delete_property)),
    );
}

/// Handler for GET /api/admin/properties
///
/// Each property reports its current tenant count and remaining
/// vacancies, never below zero.
async fn list_properties(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    auth.require_admin()?;
    let properties: Vec<PropertyDto> = state
        .properties
        .list()
        .await?
        .into_iter()
        .map(PropertyDto::from)
        .collect();
    Ok(HttpResponse::Ok().json(properties))
}

async fn get_property(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    auth.require_admin()?;
    let summary = state.properties.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PropertyDto::from(summary)))
}

async fn create_property(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<PropertyRequest>,
) -> ApiResult {
    auth.require_admin()?;
    request.validate()?;
    let property = state.properties.create(request.into_inner().into()).await?;
    let summary = state.properties.get(property.id).await?;
    Ok(HttpResponse::Created().json(PropertyDto::from(summary)))
}

async fn update_property(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<PropertyRequest>,
) -> ApiResult {
    auth.require_admin()?;
    request.validate()?;
    let property = state
        .properties
        .update(path.into_inner(), request.into_inner().into())
        .await?;
    let summary = state.properties.get(property.id).await?;
    Ok(HttpResponse::Ok().json(PropertyDto::from(summary)))
}

async fn delete_property(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    auth.require_admin()?;
    state.properties.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

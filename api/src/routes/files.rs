//! Attachment metadata and downloads

use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    web, HttpResponse,
};

use nbj_core::DomainError;
use nbj_shared::error_codes;

use crate::app::AppState;
use crate::dto::file::FileMetadataDto;
use crate::handlers::{ApiError, ApiResult};
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/files")
            .route("/{id}", web::get().to(get_metadata))
            .route("/{id}/download", web::get().to(download)),
    );
}

async fn get_metadata(
    state: web::Data<AppState>,
    _auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    let file = state
        .files
        .get_metadata(path.into_inner())
        .await
        .map_err(file_error)?;
    Ok(HttpResponse::Ok().json(FileMetadataDto::from(&file)))
}

/// Handler for GET /api/files/{id}/download
///
/// Streams the stored bytes back with the original name in
/// `Content-Disposition: attachment`.
async fn download(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    let download = state
        .files
        .download(path.into_inner())
        .await
        .map_err(file_error)?;
    tracing::debug!(file_id = download.file.id, user_id = auth.user_id, "File downloaded");

    Ok(HttpResponse::Ok()
        .content_type(download.file.content_type.as_str())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(
                download.file.original_file_name.clone(),
            )],
        })
        .body(download.bytes))
}

fn file_error(error: DomainError) -> ApiError {
    let missing = matches!(error, DomainError::NotFound { .. });
    let error = ApiError::from(error);
    if missing {
        error.with_code(error_codes::FILE_NOT_FOUND)
    } else {
        error
    }
}

use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::{AuthResponseDto, RefreshTokenRequest};
use crate::handlers::ApiResult;

/// Handler for POST /api/auth/refresh
///
/// Exchanges a refresh token for a new access token. The refresh token in
/// the response is the one that was sent.
///
/// ## Errors
/// - 401 INVALID_REFRESH_TOKEN: Expired, malformed, access-typed, or the
///   account is gone or disabled
pub async fn refresh(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> ApiResult {
    request.validate()?;
    let response = state.auth.refresh(&request.refresh_token).await?;
    tracing::debug!(user_id = response.user.id, "Access token refreshed");
    Ok(HttpResponse::Ok().json(AuthResponseDto::from(response)))
}

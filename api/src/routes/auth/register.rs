use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::auth::{AuthResponseDto, RegisterRequest};
use crate::handlers::ApiResult;

/// Handler for POST /api/auth/register
///
/// Creates a TENANT account and signs it in. When `propertyAddress` is
/// given a PENDING tenant profile is created alongside.
///
/// ## Errors
/// - 400 PASSWORD_MISMATCH: `password` and `confirmPassword` differ
/// - 400 TERMS_NOT_ACCEPTED: `acceptTerms` is false
/// - 400 EMAIL_ALREADY_EXISTS: The email is taken
/// - 400 VALIDATION_ERROR: Name, email, phone or password rules failed
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> ApiResult {
    let response = state.auth.register(request.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(AuthResponseDto::from(response)))
}

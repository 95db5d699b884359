use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::app::AppState;
use crate::dto::auth::{AuthResponseDto, LoginRequest};
use crate::handlers::ApiResult;

/// Handler for POST /api/auth/login
///
/// # Request Body
///
/// ```json
/// { "email": "tenant@example.com", "password": "Secret123!" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "accessToken": "eyJ...",
///     "refreshToken": "eyJ...",
///     "tokenType": "Bearer",
///     "expiresIn": 86400,
///     "refreshExpiresIn": 604800,
///     "user": { "id": 1, "email": "tenant@example.com", "role": "TENANT", ... },
///     "timestamp": "..."
/// }
/// ```
///
/// ## Errors
/// - 400 VALIDATION_ERROR: Malformed email or empty password
/// - 401 INVALID_CREDENTIALS: Unknown email or wrong password
/// - 401 ACCOUNT_DISABLED: Correct password on a deactivated account
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> ApiResult {
    request.validate()?;
    let LoginRequest { email, password } = request.into_inner();

    let response = state.auth.login(&email, &password).await?;
    Ok(HttpResponse::Ok().json(AuthResponseDto::from(response)))
}

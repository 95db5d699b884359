use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};

use crate::app::AppState;
use crate::dto::auth::{TokenValidationResponse, UserDto, ValidateTokenQuery};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

/// Handler for GET /api/auth/me
pub async fn me(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    let user = state.auth.current_user(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(UserDto::from(&user)))
}

/// Handler for POST /api/auth/validate
///
/// Checks the `token` query parameter, or the caller's own bearer token
/// when none is given. Never fails; an unusable token reports
/// `{"valid": false}`.
pub async fn validate(
    state: web::Data<AppState>,
    query: web::Query<ValidateTokenQuery>,
    req: HttpRequest,
    _auth: AuthContext,
) -> ApiResult {
    let token = query
        .token
        .clone()
        .filter(|t| !t.trim().is_empty())
        .or_else(|| {
            req.headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(|token| token.trim().to_string())
        })
        .unwrap_or_default();

    let validation = state.auth.validate_token(&token);
    Ok(HttpResponse::Ok().json(TokenValidationResponse::from(validation)))
}

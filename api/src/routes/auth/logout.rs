use actix_web::HttpResponse;

use crate::dto::auth::MessageResponse;
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

/// Handler for POST /api/auth/logout
///
/// Tokens are stateless, so there is nothing to revoke; the client drops
/// its copies.
pub async fn logout(auth: AuthContext) -> ApiResult {
    tracing::info!(user_id = auth.user_id, "User logged out");
    Ok(HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")))
}

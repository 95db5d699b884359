use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::stripe::OnboardingResponse;
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/stripe/create-connect-account",
        web::post().to(create_connect_account),
    );
}

/// Handler for POST /api/stripe/create-connect-account
///
/// ## Errors
/// - 403 ACCESS_DENIED: Caller is not an admin
/// - 503 STRIPE_NOT_CONFIGURED: No secret key configured
/// - 502 EXTERNAL_SERVICE_ERROR: Stripe rejected the call
async fn create_connect_account(state: web::Data<AppState>, auth: AuthContext) -> ApiResult {
    auth.require_admin()?;
    let link = state.stripe.create_connect_account(&auth.email).await?;
    Ok(HttpResponse::Ok().json(OnboardingResponse::from(link)))
}

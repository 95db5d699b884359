//! Payment history and bookkeeping under `/admin/payments`

use actix_web::{web, HttpResponse};
use validator::Validate;

use nbj_core::services::{NewPayment, PaymentHistoryQuery};

use crate::app::AppState;
use crate::dto::payment::{
    CreatePaymentRequest, LateFeeRequest, MarkPaidRequest, PaymentDto, PaymentHistoryParams,
    PaymentHistoryResponse,
};
use crate::handlers::ApiResult;
use crate::middleware::AuthContext;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin/payments")
            .route("", web::post().to(create_payment))
            .route("/history", web::get().to(payment_history))
            .route("/{id}", web::get().to(get_payment))
            .route("/{id}/mark-paid", web::put().to(mark_paid))
            .route("/{id}/late-fee", web::put().to(apply_late_fee)),
    );
}

/// Handler for GET /api/admin/payments/history
///
/// # Query
///
/// `tenantName` (partial, case-insensitive), `status`, `startDate` and
/// `endDate` (inclusive, on the payment date), `page`, `size`, and either
/// `sortBy`/`sortDir` or `sort=field,dir`. Defaults to `paymentDate,desc`.
async fn payment_history(
    state: web::Data<AppState>,
    auth: AuthContext,
    query: web::Query<PaymentHistoryParams>,
) -> ApiResult {
    auth.require_admin()?;
    let query = PaymentHistoryQuery::try_from(query.into_inner())?;
    let page = state.payments.history(query).await?;
    Ok(HttpResponse::Ok().json(PaymentHistoryResponse::from(page)))
}

async fn create_payment(
    state: web::Data<AppState>,
    auth: AuthContext,
    request: web::Json<CreatePaymentRequest>,
) -> ApiResult {
    auth.require_admin()?;
    request.validate()?;
    let payment = state
        .payments
        .create(NewPayment::try_from(request.into_inner())?)
        .await?;
    Ok(HttpResponse::Created().json(PaymentDto::from(payment)))
}

async fn get_payment(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
) -> ApiResult {
    auth.require_admin()?;
    let payment = state.payments.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(PaymentDto::from(payment)))
}

/// Handler for PUT /api/admin/payments/{id}/mark-paid
///
/// Records the method and transaction id; the calling admin is stored as
/// the processor.
async fn mark_paid(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<MarkPaidRequest>,
) -> ApiResult {
    auth.require_admin()?;
    let method = request.method()?;
    let MarkPaidRequest { transaction_id, .. } = request.into_inner();
    let payment = state
        .payments
        .mark_paid(path.into_inner(), method, transaction_id, &auth.email)
        .await?;
    Ok(HttpResponse::Ok().json(PaymentDto::from(payment)))
}

async fn apply_late_fee(
    state: web::Data<AppState>,
    auth: AuthContext,
    path: web::Path<i64>,
    request: web::Json<LateFeeRequest>,
) -> ApiResult {
    auth.require_admin()?;
    request.validate()?;
    let payment = state
        .payments
        .apply_late_fee(path.into_inner(), request.rate, request.grace_period_days)
        .await?;
    Ok(HttpResponse::Ok().json(PaymentDto::from(payment)))
}

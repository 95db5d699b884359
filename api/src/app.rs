//! Application state and factory
//!
//! [`AppState`] wires every service over a set of repositories; the binary
//! passes the MySQL implementations and the tests pass the in-memory ones.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use nbj_core::repositories::{
    AttachmentRepository, LeaseRepository, MaintenanceRepository, PaymentRepository,
    PropertyRepository, TenantRepository, UserRepository,
};
use nbj_core::services::{
    AuthService, ConnectAccountGateway, DashboardService, FileService, FileStorage, LeaseService,
    MaintenanceService, PasswordHasher, PaymentService, PropertyService, StripeService,
    TenantService, TokenService,
};
use nbj_shared::{error_codes, AppConfig, CorsConfig, Environment, ErrorResponse};

use crate::handlers::{json_config, path_config, query_config};
use crate::middleware::{build_cors, JwtAuth, SecurityHeaders};
use crate::routes;

/// Storage backends the services are built on
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub tenants: Arc<dyn TenantRepository>,
    pub properties: Arc<dyn PropertyRepository>,
    pub leases: Arc<dyn LeaseRepository>,
    pub maintenance: Arc<dyn MaintenanceRepository>,
    pub attachments: Arc<dyn AttachmentRepository>,
    pub payments: Arc<dyn PaymentRepository>,
}

/// Shared state handed to every handler
pub struct AppState {
    pub environment: Environment,
    pub auth: Arc<AuthService>,
    pub tenants: Arc<TenantService>,
    pub properties: Arc<PropertyService>,
    pub maintenance: Arc<MaintenanceService>,
    pub leases: Arc<LeaseService>,
    pub payments: Arc<PaymentService>,
    pub files: Arc<FileService>,
    pub dashboard: Arc<DashboardService>,
    pub stripe: Arc<StripeService>,
    pub cors: CorsConfig,
    /// Largest accepted request body, JSON or raw upload
    pub max_payload_size: usize,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        repositories: Repositories,
        storage: Arc<dyn FileStorage>,
        gateway: Arc<dyn ConnectAccountGateway>,
        tokens: Arc<TokenService>,
        passwords: PasswordHasher,
    ) -> Self {
        let Repositories {
            users,
            tenants,
            properties,
            leases,
            maintenance,
            attachments,
            payments,
        } = repositories;

        let files = Arc::new(FileService::new(
            attachments,
            storage,
            config.storage.max_file_size,
        ));

        Self {
            environment: config.environment,
            auth: Arc::new(AuthService::new(
                users.clone(),
                tenants.clone(),
                tokens,
                passwords,
            )),
            tenants: Arc::new(TenantService::new(tenants.clone(), users.clone())),
            properties: Arc::new(PropertyService::new(properties.clone(), tenants.clone())),
            maintenance: Arc::new(MaintenanceService::new(
                maintenance.clone(),
                tenants.clone(),
                users.clone(),
                files.clone(),
            )),
            leases: Arc::new(LeaseService::new(leases, tenants.clone())),
            payments: Arc::new(PaymentService::new(payments, tenants.clone(), users.clone())),
            dashboard: Arc::new(DashboardService::new(
                users.clone(),
                tenants,
                maintenance,
                properties,
            )),
            stripe: Arc::new(StripeService::new(users, gateway)),
            files,
            cors: config.cors.clone(),
            max_payload_size: config
                .server
                .max_payload_size
                .max(config.storage.max_file_size),
        }
    }
}

/// Builds the application; every route lives under `/api`
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let cors = build_cors(&state.cors);
    let security = SecurityHeaders::for_environment(state.environment);
    let max_payload = state.max_payload_size;

    App::new()
        .app_data(state)
        .app_data(json_config(max_payload))
        .app_data(web::PayloadConfig::new(max_payload))
        .app_data(path_config())
        .app_data(query_config())
        // Registration order is inside-out: the tracing span is outermost
        .wrap(security)
        .wrap(cors)
        .wrap(TracingLogger::default())
        .service(
            web::scope("/api")
                .wrap(JwtAuth)
                .configure(routes::configure),
        )
        .default_service(web::route().to(not_found))
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}

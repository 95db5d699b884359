//! NBJ tenant management API server

use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use nbj_api::{create_app, AppState, Repositories};
use nbj_core::services::{PasswordHasher, TokenService, TokenServiceConfig};
use nbj_infra::{
    DatabasePool, LocalFileStorage, MySqlAttachmentRepository, MySqlLeaseRepository,
    MySqlMaintenanceRepository, MySqlPaymentRepository, MySqlPropertyRepository,
    MySqlTenantRepository, MySqlUserRepository, StripeConnectClient,
};
use nbj_shared::{config::LogFormat, AppConfig, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config.logging);

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {}", e))?;

    tracing::info!(
        environment = ?config.environment,
        bind = %config.server.bind_address(),
        "Starting NBJ tenant management API"
    );

    let database = DatabasePool::new(&config.database)
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        database
            .run_migrations()
            .await
            .context("failed to run database migrations")?;
    }

    let pool = database.pool().clone();
    let repositories = Repositories {
        users: Arc::new(MySqlUserRepository::new(pool.clone())),
        tenants: Arc::new(MySqlTenantRepository::new(pool.clone())),
        properties: Arc::new(MySqlPropertyRepository::new(pool.clone())),
        leases: Arc::new(MySqlLeaseRepository::new(pool.clone())),
        maintenance: Arc::new(MySqlMaintenanceRepository::new(pool.clone())),
        attachments: Arc::new(MySqlAttachmentRepository::new(pool.clone())),
        payments: Arc::new(MySqlPaymentRepository::new(pool)),
    };

    let storage = LocalFileStorage::new(&config.storage)
        .await
        .context("failed to prepare the upload directory")?;
    let stripe = StripeConnectClient::new(config.stripe.clone())
        .context("failed to build the Stripe client")?;
    if !config.stripe.is_configured() {
        tracing::warn!("Stripe secret key not set; Connect onboarding is disabled");
    }

    let token_config = TokenServiceConfig::from_jwt_config(&config.jwt)
        .map_err(|e| anyhow::anyhow!("invalid JWT settings: {}", e))?;

    let state = web::Data::new(AppState::new(
        &config,
        repositories,
        Arc::new(storage),
        Arc::new(stripe),
        Arc::new(TokenService::new(token_config)),
        PasswordHasher::new(config.jwt.bcrypt_cost),
    ));

    let mut server = HttpServer::new(move || create_app(state.clone()))
        .keep_alive(std::time::Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(config.server.bind_address())
        .with_context(|| format!("failed to bind {}", config.server.bind_address()))?
        .run()
        .await
        .context("server terminated with an error")?;

    database.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` overrides the configured level
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_file(logging.source_location)
                    .with_line_number(logging.source_location),
            )
            .init(),
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_target(false))
            .init(),
        LogFormat::Full => registry
            .with(
                fmt::layer()
                    .with_file(logging.source_location)
                    .with_line_number(logging.source_location),
            )
            .init(),
    }
}

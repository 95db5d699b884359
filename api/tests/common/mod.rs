//! Shared fixtures for the HTTP tests: an application over in-memory
//! repositories plus helpers to seed accounts and mint tokens.

#![allow(dead_code)]

use std::fmt::Debug;
use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{header, StatusCode};
use actix_web::{test, web};
use serde_json::Value;

use nbj_api::{AppState, Repositories};
use nbj_core::entities::{Role, Tenant, TenantStatus, User};
use nbj_core::repositories::{
    MockAttachmentRepository, MockLeaseRepository, MockMaintenanceRepository,
    MockPaymentRepository, MockPropertyRepository, MockTenantRepository, MockUserRepository,
    TenantRepository, UserRepository,
};
use nbj_core::services::{
    MockConnectAccountGateway, MockFileStorage, PasswordHasher, TokenService, TokenServiceConfig,
};
use nbj_shared::{AppConfig, Environment};

pub const PASSWORD: &str = "Secret@123";

pub struct TestContext {
    pub state: web::Data<AppState>,
    pub users: Arc<MockUserRepository>,
    pub tenants: Arc<MockTenantRepository>,
    pub properties: Arc<MockPropertyRepository>,
    pub payments: Arc<MockPaymentRepository>,
    pub leases: Arc<MockLeaseRepository>,
    pub storage: Arc<MockFileStorage>,
    pub gateway: Arc<MockConnectAccountGateway>,
    hasher: PasswordHasher,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_gateway(MockConnectAccountGateway::new())
    }

    pub fn with_gateway(gateway: MockConnectAccountGateway) -> Self {
        let users = Arc::new(MockUserRepository::new());
        let tenants = Arc::new(MockTenantRepository::new());
        let properties = Arc::new(MockPropertyRepository::new());
        let payments = Arc::new(MockPaymentRepository::new());
        let leases = Arc::new(MockLeaseRepository::new());
        let storage = Arc::new(MockFileStorage::new());
        let gateway = Arc::new(gateway);
        let hasher = PasswordHasher::new(4);

        let repositories = Repositories {
            users: users.clone(),
            tenants: tenants.clone(),
            properties: properties.clone(),
            leases: leases.clone(),
            maintenance: Arc::new(MockMaintenanceRepository::new()),
            attachments: Arc::new(MockAttachmentRepository::new()),
            payments: payments.clone(),
        };

        let config = AppConfig::for_environment(Environment::Development);
        let state = AppState::new(
            &config,
            repositories,
            storage.clone(),
            gateway.clone(),
            Arc::new(TokenService::new(TokenServiceConfig::default())),
            hasher,
        );

        Self {
            state: web::Data::new(state),
            users,
            tenants,
            properties,
            payments,
            leases,
            storage,
            gateway,
            hasher,
        }
    }

    pub async fn create_user(&self, email: &str, role: Role) -> User {
        let hash = self.hasher.hash(PASSWORD).unwrap();
        let mut user = User::new(email, hash, "Test", "User", role);
        user.email_verified = true;
        self.users.create(user).await.unwrap()
    }

    pub async fn create_admin(&self) -> User {
        self.create_user("admin@nbj.test", Role::Admin).await
    }

    /// A TENANT account with an ACTIVE profile
    pub async fn create_tenant(&self, email: &str, address: &str) -> (User, Tenant) {
        let user = self.create_user(email, Role::Tenant).await;
        let tenant = Tenant::new(user.id, address)
            .with_unit(Some("4B".to_string()))
            .with_status(TenantStatus::Active);
        let tenant = self.tenants.create(tenant).await.unwrap();
        (user, tenant)
    }

    pub fn token_for(&self, user: &User) -> String {
        self.state
            .auth
            .token_service()
            .generate_access_token(&user.email)
            .unwrap()
    }
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Sends a request and decodes the JSON body
pub async fn call<S, R, B, E>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = E>,
    B: MessageBody,
    E: Debug,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

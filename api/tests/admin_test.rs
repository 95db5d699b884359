//! Property manager endpoints: properties, tenants, payments, leases,
//! dashboards and Stripe onboarding

mod common;

use actix_web::{http::StatusCode, test};
use chrono::{Duration, Utc};
use serde_json::{json, Value};

use common::{bearer, call, TestContext};
use nbj_api::create_app;
use nbj_core::entities::User;
use nbj_core::repositories::{TenantRepository, UserRepository};
use nbj_core::services::MockConnectAccountGateway;

fn property(name: &str, units: i32) -> Value {
    json!({
        "name": name,
        "address": "100 Queen Street",
        "mapLink": "https://maps.example.com/?q=100+Queen+Street",
        "managerOwnerName": "Harbour Holdings",
        "numberOfUnits": units
    })
}

async fn rename(ctx: &TestContext, mut user: User, first: &str, last: &str) -> User {
    user.first_name = first.to_string();
    user.last_name = last.to_string();
    ctx.users.update(user).await.unwrap()
}

#[actix_web::test]
async fn test_property_crud_and_vacancies() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin().await;
    let token = ctx.token_for(&admin);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/admin/properties")
        .insert_header(bearer(&token))
        .set_json(property("Queen St Flats", 2))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["numberOfUnits"], 2);
    assert_eq!(body["currentTenantsCount"], 0);
    assert_eq!(body["vacanciesCount"], 2);
    let property_id = body["id"].as_i64().unwrap();

    // three tenants in a two-unit building
    for email in ["a@nbj.test", "b@nbj.test", "c@nbj.test"] {
        let (_, mut tenant) = ctx.create_tenant(email, "100 Queen Street").await;
        tenant.property_id = Some(property_id);
        ctx.tenants.update(tenant).await.unwrap();
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/admin/properties/{}", property_id))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentTenantsCount"], 3);
    assert_eq!(body["vacanciesCount"], 0);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/properties/{}", property_id))
        .insert_header(bearer(&token))
        .set_json(property("Queen St Flats", 5))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["vacanciesCount"], 2);

    let req = test::TestRequest::post()
        .uri("/api/admin/properties")
        .insert_header(bearer(&token))
        .set_json(property("Broken", -1))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "VALIDATION_ERROR");

    let req = test::TestRequest::get()
        .uri("/api/admin/properties")
        .insert_header(bearer(&token))
        .to_request();
    let (_, body) = call(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/properties/{}", property_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/admin/properties/{}", property_id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(call(&app, req).await.0, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_tenant_administration() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin().await;
    let token = ctx.token_for(&admin);
    let (_, jane) = ctx.create_tenant("jane@nbj.test", "1 Main St").await;
    ctx.create_tenant("omar@nbj.test", "2 Main St").await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/tenants?page=0&size=1")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["tenants"].as_array().unwrap().len(), 1);
    assert!(body["tenants"][0]["user"]["email"].is_string());

    let req = test::TestRequest::put()
        .uri(&format!("/api/tenants/{}", jane.id))
        .insert_header(bearer(&token))
        .set_json(json!({
            "firstName": "Janet",
            "propertyAddress": "9 Pier Lane",
            "status": "suspended"
        }))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["firstName"], "Janet");
    assert_eq!(body["user"]["lastName"], "User");
    assert_eq!(body["propertyAddress"], "9 Pier Lane");
    assert_eq!(body["status"], "INACTIVE");

    let req = test::TestRequest::put()
        .uri(&format!("/api/tenants/{}", jane.id))
        .insert_header(bearer(&token))
        .set_json(json!({ "email": "omar@nbj.test" }))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "EMAIL_ALREADY_EXISTS");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tenants/{}", jane.id))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tenants/{}", jane.id))
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_payment_history_and_processing() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin().await;
    let token = ctx.token_for(&admin);
    let (jane_user, jane) = ctx.create_tenant("jane@nbj.test", "1 Main St").await;
    let (omar_user, omar) = ctx.create_tenant("omar@nbj.test", "2 Main St").await;
    rename(&ctx, jane_user, "Jane", "Whitfield").await;
    rename(&ctx, omar_user, "Omar", "Haddad").await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let mut ids = Vec::new();
    for (tenant_id, amount, due) in [
        (jane.id, 1200.0, "2024-01-01"),
        (jane.id, 1250.0, "2024-02-01"),
        (omar.id, 900.0, "2024-01-05"),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/admin/payments")
            .insert_header(bearer(&token))
            .set_json(json!({ "tenantId": tenant_id, "amount": amount, "dueDate": due }))
            .to_request();
        let (status, body) = call(&app, req).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "PENDING");
        assert_eq!(body["paymentType"], "RENT");
        ids.push(body["id"].as_i64().unwrap());
    }

    let req = test::TestRequest::get()
        .uri("/api/admin/payments/history?tenantName=whit")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 2);
    assert_eq!(body["payments"][0]["tenantName"], "Jane Whitfield");
    assert_eq!(body["payments"][0]["propertyAddress"], "1 Main St");

    let req = test::TestRequest::get()
        .uri("/api/admin/payments/history?tenantName=nobody")
        .insert_header(bearer(&token))
        .to_request();
    let (_, body) = call(&app, req).await;
    assert_eq!(body["totalItems"], 0);

    let req = test::TestRequest::get()
        .uri("/api/admin/payments/history?sort=amount,asc")
        .insert_header(bearer(&token))
        .to_request();
    let (_, body) = call(&app, req).await;
    let amounts: Vec<f64> = body["payments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["amount"].as_f64().unwrap())
        .collect();
    assert_eq!(amounts, vec![900.0, 1200.0, 1250.0]);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/payments/{}/mark-paid", ids[0]))
        .insert_header(bearer(&token))
        .set_json(json!({ "paymentMethod": "BANK_TRANSFER", "transactionId": "TX-881" }))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "COMPLETED");
    assert_eq!(body["paymentMethod"], "BANK_TRANSFER");
    assert_eq!(body["processedBy"], "admin@nbj.test");
    assert!(!body["paymentDate"].is_null());

    // a completed payment cannot be paid twice
    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/payments/{}/mark-paid", ids[0]))
        .insert_header(bearer(&token))
        .set_json(json!({ "paymentMethod": "CASH" }))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorCode"], "INVALID_TRANSITION");

    let req = test::TestRequest::get()
        .uri("/api/admin/payments/history?status=COMPLETED")
        .insert_header(bearer(&token))
        .to_request();
    let (_, body) = call(&app, req).await;
    assert_eq!(body["totalItems"], 1);
    assert_eq!(body["payments"][0]["transactionId"], "TX-881");

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/payments/{}/late-fee", ids[2]))
        .insert_header(bearer(&token))
        .set_json(json!({ "rate": 0.05, "gracePeriodDays": 5 }))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lateFee"], 45.0);
    assert_eq!(body["totalAmount"], 945.0);

    let req = test::TestRequest::put()
        .uri(&format!("/api/admin/payments/{}/late-fee", ids[2]))
        .insert_header(bearer(&token))
        .set_json(json!({ "rate": -0.5, "gracePeriodDays": 0 }))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "VALIDATION_ERROR");

    let req = test::TestRequest::get()
        .uri("/api/admin/payments/history?startDate=2024-03-01&endDate=2024-01-01")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_lease_signature_flow() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin().await;
    let admin_token = ctx.token_for(&admin);
    let (user, tenant) = ctx.create_tenant("jane@nbj.test", "1 Main St").await;
    let tenant_token = ctx.token_for(&user);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let today = Utc::now().date_naive();
    let start = today - Duration::days(30);
    let end = today + Duration::days(20);

    let req = test::TestRequest::post()
        .uri("/api/admin/leases")
        .insert_header(bearer(&admin_token))
        .set_json(json!({
            "tenantId": tenant.id,
            "startDate": end.to_string(),
            "endDate": start.to_string(),
            "monthlyRent": 1500
        }))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "VALIDATION_ERROR");

    let req = test::TestRequest::post()
        .uri("/api/admin/leases")
        .insert_header(bearer(&admin_token))
        .set_json(json!({
            "tenantId": tenant.id,
            "startDate": start.to_string(),
            "endDate": end.to_string(),
            "monthlyRent": 1500,
            "securityDeposit": 3000
        }))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "DRAFT");
    let id = body["id"].as_i64().unwrap();

    let put = |uri: String, token: &str| {
        test::TestRequest::put()
            .uri(&uri)
            .insert_header(bearer(token))
            .to_request()
    };

    let (_, body) = call(&app, put(format!("/api/admin/leases/{}/submit", id), &admin_token)).await;
    assert_eq!(body["status"], "PENDING_SIGNATURE");

    let (status, body) = call(&app, put(format!("/api/admin/leases/{}/activate", id), &admin_token)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errorCode"], "INVALID_TRANSITION");

    let (status, body) = call(&app, put(format!("/api/leases/{}/sign", id), &tenant_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PENDING_SIGNATURE");
    assert!(!body["tenantSignedDate"].is_null());

    let (_, body) = call(&app, put(format!("/api/leases/{}/sign", id), &admin_token)).await;
    assert_eq!(body["status"], "SIGNED");

    let (status, body) = call(&app, put(format!("/api/admin/leases/{}/activate", id), &admin_token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ACTIVE");
    assert_eq!(body["daysUntilExpiration"], 20);

    let req = test::TestRequest::get()
        .uri("/api/admin/leases/expiring?days=30")
        .insert_header(bearer(&admin_token))
        .to_request();
    let (_, body) = call(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/api/admin/leases/expiring?days=10")
        .insert_header(bearer(&admin_token))
        .to_request();
    let (_, body) = call(&app, req).await;
    assert!(body.as_array().unwrap().is_empty());

    let req = test::TestRequest::get()
        .uri("/api/admin/leases/expiring?days=100000000")
        .insert_header(bearer(&admin_token))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "VALIDATION_ERROR");

    let (_, body) = call(&app, put(format!("/api/admin/leases/{}/renewal-notice", id), &admin_token)).await;
    assert_eq!(body["renewalNoticeSent"], true);
    assert_eq!(body["renewalNoticeDate"], today.to_string());

    let req = test::TestRequest::get()
        .uri("/api/leases/my")
        .insert_header(bearer(&tenant_token))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], id);

    let req = test::TestRequest::get()
        .uri("/api/admin/leases?status=active")
        .insert_header(bearer(&admin_token))
        .to_request();
    let (_, body) = call(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_foreign_tenant_cannot_sign() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin().await;
    let (_, owner) = ctx.create_tenant("jane@nbj.test", "1 Main St").await;
    let (other, _) = ctx.create_tenant("omar@nbj.test", "2 Main St").await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let today = Utc::now().date_naive();
    let req = test::TestRequest::post()
        .uri("/api/admin/leases")
        .insert_header(bearer(&ctx.token_for(&admin)))
        .set_json(json!({
            "tenantId": owner.id,
            "startDate": today.to_string(),
            "endDate": (today + Duration::days(365)).to_string(),
            "monthlyRent": 1100
        }))
        .to_request();
    let (_, body) = call(&app, req).await;
    let id = body["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/leases/{}/sign", id))
        .insert_header(bearer(&ctx.token_for(&other)))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["errorCode"], "ACCESS_DENIED");
}

#[actix_web::test]
async fn test_dashboards() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin().await;
    let admin_token = ctx.token_for(&admin);
    let (user, _) = ctx.create_tenant("jane@nbj.test", "1 Main St").await;
    let tenant_token = ctx.token_for(&user);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    for title in ["Broken window latch", "Heater not working"] {
        let req = test::TestRequest::post()
            .uri("/api/maintenance")
            .insert_header(bearer(&tenant_token))
            .set_json(json!({
                "title": title,
                "description": "Needs a look",
                "category": "OTHER",
                "priority": "MEDIUM"
            }))
            .to_request();
        assert_eq!(call(&app, req).await.0, StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/dashboard/tenant")
        .insert_header(bearer(&tenant_token))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile"]["email"], "jane@nbj.test");
    assert_eq!(body["profile"]["propertyAddress"], "1 Main St");
    assert_eq!(body["maintenance"]["pendingRequests"], 2);
    assert_eq!(body["maintenance"]["activeRequests"], 0);
    assert_eq!(body["maintenance"]["recentRequests"].as_array().unwrap().len(), 2);

    let req = test::TestRequest::get()
        .uri("/api/dashboard/admin")
        .insert_header(bearer(&admin_token))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalTenants"], 1);
    assert_eq!(body["pendingMaintenanceRequests"], 2);
    assert_eq!(body["totalProperties"], 0);

    let req = test::TestRequest::get()
        .uri("/api/dashboard/tenant")
        .insert_header(bearer(&admin_token))
        .to_request();
    assert_eq!(call(&app, req).await.0, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_stripe_onboarding() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin().await;
    let token = ctx.token_for(&admin);
    let (user, _) = ctx.create_tenant("jane@nbj.test", "1 Main St").await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/stripe/create-connect-account")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    let account_id = body["accountId"].as_str().unwrap().to_string();
    assert!(account_id.starts_with("acct_"));
    assert!(body["onboardingUrl"].as_str().unwrap().contains(&account_id));

    // second call reuses the linked account
    let req = test::TestRequest::post()
        .uri("/api/stripe/create-connect-account")
        .insert_header(bearer(&token))
        .to_request();
    let (_, body) = call(&app, req).await;
    assert_eq!(body["accountId"], account_id.as_str());
    assert_eq!(ctx.gateway.accounts_created(), 1);

    let req = test::TestRequest::post()
        .uri("/api/stripe/create-connect-account")
        .insert_header(bearer(&ctx.token_for(&user)))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["errorCode"], "ACCESS_DENIED");
}

#[actix_web::test]
async fn test_stripe_not_configured() {
    let ctx = TestContext::with_gateway(MockConnectAccountGateway::unconfigured());
    let admin = ctx.create_admin().await;
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/stripe/create-connect-account")
        .insert_header(bearer(&ctx.token_for(&admin)))
        .to_request();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["errorCode"], "STRIPE_NOT_CONFIGURED");
}

//! Route table for the `/api` scope
//!
//! Each module owns one resource and registers its handlers through a
//! `configure` function.

pub mod auth;
pub mod dashboard;
pub mod files;
pub mod health;
pub mod leases;
pub mod maintenance;
pub mod payments;
pub mod properties;
pub mod stripe;
pub mod tenants;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(auth::configure)
        .configure(tenants::configure)
        .configure(maintenance::configure)
        .configure(files::configure)
        .configure(properties::configure)
        .configure(payments::configure)
        .configure(leases::configure)
        .configure(dashboard::configure)
        .configure(stripe::configure);
}

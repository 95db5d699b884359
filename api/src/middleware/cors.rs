//! CORS policy built from configuration.
//!
//! A `*` entry in `allowed_origins` accepts any origin, which is what the
//! development profile uses; otherwise only the listed origins are allowed.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use nbj_shared::CorsConfig;

pub fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::CACHE_CONTROL,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        tracing::info!("CORS accepts any origin");
        cors = cors.allow_any_origin();
    } else {
        for origin in config.allowed_origins.iter().map(|o| o.trim()) {
            if !origin.is_empty() {
                tracing::info!(origin, "Adding allowed origin");
                cors = cors.allowed_origin(origin);
            }
        }
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}

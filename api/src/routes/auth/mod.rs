//! Authentication route handlers
//!
//! Login, registration and refresh are public; logout, `me` and token
//! validation need a bearer token.

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod session;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login::login))
            .route("/register", web::post().to(register::register))
            .route("/refresh", web::post().to(refresh::refresh))
            .route("/logout", web::post().to(logout::logout))
            .route("/me", web::get().to(session::me))
            .route("/validate", web::post().to(session::validate)),
    );
}

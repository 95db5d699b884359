//! Token service module for JWT management
//!
//! Access and refresh tokens are both signed JWTs told apart by their
//! `type` claim. Nothing is stored server side, so there is no revocation.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;

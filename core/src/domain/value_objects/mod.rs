//! Value objects returned by services.

pub mod auth_response;

pub use auth_response::{AuthResponse, AuthenticatedUser, TokenValidation};

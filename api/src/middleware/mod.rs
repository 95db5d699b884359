//! Request middleware wrapped around the `/api` scope

pub mod auth;
pub mod cors;
pub mod security;

pub use auth::{is_public_path, AuthContext, JwtAuth};
pub use cors::build_cors;
pub use security::SecurityHeaders;

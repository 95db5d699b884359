//! Authentication use cases: login, registration, token refresh and
//! per-request principal resolution.

mod service;

#[cfg(test)]
mod tests;

pub use service::{AuthService, RegisterCommand};

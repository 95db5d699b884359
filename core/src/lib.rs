//! # NBJ Core
//!
//! Core business logic and domain layer for the NBJ tenant management backend.
//! This crate contains domain entities, business services, repository interfaces
//! (with in-memory implementations used by tests), and the error types that
//! every other layer maps from.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities;
pub use domain::value_objects::{AuthResponse, AuthenticatedUser, TokenValidation};
pub use errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};

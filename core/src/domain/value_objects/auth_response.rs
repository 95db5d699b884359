//! Authentication results handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::{Role, User};

/// Tokens plus the account they were issued for
///
/// Returned by login, registration and refresh. On refresh the refresh
/// token is the one the client presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub tokens: TokenPair,
    pub user: User,
}

impl AuthResponse {
    pub fn new(tokens: TokenPair, user: User) -> Self {
        Self { tokens, user }
    }
}

/// Principal attached to an authenticated request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Outcome of checking an arbitrary token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValidation {
    Valid {
        username: String,
        /// Milliseconds until expiry
        remaining_ms: i64,
        should_refresh: bool,
    },
    Invalid,
}

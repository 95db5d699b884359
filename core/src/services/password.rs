//! Password hashing and strength rules

use crate::errors::{DomainError, DomainResult};

/// bcrypt wrapper with a configurable work factor
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {}", e),
        })
    }

    /// `false` for a wrong password and for a malformed hash
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match bcrypt::verify(password, hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash could not be parsed");
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

const SPECIAL_CHARACTERS: &str = "@$!%*?&";

/// 8 to 100 characters with a lower-case letter, an upper-case letter, a
/// digit and one of `@$!%*?&`
pub fn validate_password_strength(password: &str) -> Result<(), &'static str> {
    let length = password.chars().count();
    if !(8..=100).contains(&length) {
        return Err("Password must be between 8 and 100 characters");
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(c));
    if has_lower && has_upper && has_digit && has_special {
        Ok(())
    } else {
        Err("Password must contain at least one lowercase letter, one uppercase letter, one digit, and one special character")
    }
}

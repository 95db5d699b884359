//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations handle the actual storage while services stay on this
/// side of the abstraction boundary.
///
/// # Example
/// ```no_run
/// # use nbj_core::repositories::UserRepository;
/// # async fn example(repo: &dyn UserRepository) -> Result<(), nbj_core::errors::DomainError> {
/// if let Some(mut user) = repo.find_by_email("jane@example.com").await? {
///     user.record_login();
///     repo.update(user).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by database identifier
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;

    /// Find a user by login email (exact match)
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No account uses this email
    /// * `Err(DomainError)` - Storage failure
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Check whether an account already uses `email`
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Users whose first or last name contains `name`, case-insensitive
    async fn search_by_name(&self, name: &str) -> Result<Vec<User>, DomainError>;

    /// Persist a new user and return it with its assigned id
    ///
    /// # Returns
    /// * `Err(DomainError::Conflict)` - The email is already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No user with `user.id`
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user; `Ok(false)` when it did not exist
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// Total number of accounts
    async fn count(&self) -> Result<u64, DomainError>;
}

//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use nbj_core::domain::entities::user::User;
use nbj_core::errors::DomainError;
use nbj_core::repositories::UserRepository;

use super::{column, db_error, enum_column};

const USER_COLUMNS: &str = "id, email, password, first_name, last_name, phone_number, role, \
     is_active, email_verified, stripe_account_id, last_login_at, created_at, updated_at";

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        Ok(User {
            id: column(row, "id")?,
            email: column(row, "email")?,
            password_hash: column(row, "password")?,
            first_name: column(row, "first_name")?,
            last_name: column(row, "last_name")?,
            phone_number: column(row, "phone_number")?,
            role: enum_column(row, "role")?,
            is_active: column(row, "is_active")?,
            email_verified: column(row, "email_verified")?,
            stripe_account_id: column(row, "stripe_account_id")?,
            last_login_at: column(row, "last_login_at")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    async fn fetch_one_where(&self, clause: &str, value: &str) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE {} = ? LIMIT 1", USER_COLUMNS, clause);
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user", e))?;
        row.as_ref().map(Self::row_to_user).transpose()
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let query = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find user by id", e))?;
        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        self.fetch_one_where("email", email).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?) AS found")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check email", e))?;
        let found: i64 = column(&row, "found")?;
        Ok(found == 1)
    }

    async fn search_by_name(&self, name: &str) -> Result<Vec<User>, DomainError> {
        let pattern = format!("%{}%", name.to_lowercase());
        let query = format!(
            "SELECT {} FROM users WHERE LOWER(first_name) LIKE ? OR LOWER(last_name) LIKE ? ORDER BY id",
            USER_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to search users", e))?;
        rows.iter().map(Self::row_to_user).collect()
    }

    async fn create(&self, mut user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                email, password, first_name, last_name, phone_number, role,
                is_active, email_verified, stripe_account_id, last_login_at,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone_number)
            .bind(user.role.as_str())
            .bind(user.is_active)
            .bind(user.email_verified)
            .bind(&user.stripe_account_id)
            .bind(user.last_login_at)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create user", e))?;

        user.id = result.last_insert_id() as i64;
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            UPDATE users SET
                email = ?, password = ?, first_name = ?, last_name = ?,
                phone_number = ?, role = ?, is_active = ?, email_verified = ?,
                stripe_account_id = ?, last_login_at = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone_number)
            .bind(user.role.as_str())
            .bind(user.is_active)
            .bind(user.email_verified)
            .bind(&user.stripe_account_id)
            .bind(user.last_login_at)
            .bind(user.updated_at)
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update user", e))?;

        if result.rows_affected() == 0 && self.find_by_id(user.id).await?.is_none() {
            return Err(DomainError::not_found("User"));
        }
        Ok(user)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count users", e))?;
        let total: i64 = column(&row, "total")?;
        Ok(total as u64)
    }
}

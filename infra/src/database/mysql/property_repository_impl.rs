//! MySQL implementation of the PropertyRepository trait.

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use nbj_core::domain::entities::property::Property;
use nbj_core::errors::DomainError;
use nbj_core::repositories::PropertyRepository;

use super::{column, db_error};

const PROPERTY_COLUMNS: &str =
    "id, name, address, map_link, manager_owner_name, number_of_units, created_at, updated_at";

pub struct MySqlPropertyRepository {
    pool: MySqlPool,
}

impl MySqlPropertyRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_property(row: &MySqlRow) -> Result<Property, DomainError> {
        Ok(Property {
            id: column(row, "id")?,
            name: column(row, "name")?,
            address: column(row, "address")?,
            map_link: column(row, "map_link")?,
            manager_owner_name: column(row, "manager_owner_name")?,
            number_of_units: column(row, "number_of_units")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }
}

#[async_trait]
impl PropertyRepository for MySqlPropertyRepository {
    async fn find_all(&self) -> Result<Vec<Property>, DomainError> {
        let query = format!("SELECT {} FROM properties ORDER BY name, id", PROPERTY_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list properties", e))?;
        rows.iter().map(Self::row_to_property).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Property>, DomainError> {
        let query = format!("SELECT {} FROM properties WHERE id = ?", PROPERTY_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find property", e))?;
        row.as_ref().map(Self::row_to_property).transpose()
    }

    async fn create(&self, mut property: Property) -> Result<Property, DomainError> {
        let result = sqlx::query(
            "INSERT INTO properties (name, address, map_link, manager_owner_name, number_of_units, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&property.name)
        .bind(&property.address)
        .bind(&property.map_link)
        .bind(&property.manager_owner_name)
        .bind(property.number_of_units)
        .bind(property.created_at)
        .bind(property.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create property", e))?;

        property.id = result.last_insert_id() as i64;
        Ok(property)
    }

    async fn update(&self, property: Property) -> Result<Property, DomainError> {
        let result = sqlx::query(
            "UPDATE properties SET name = ?, address = ?, map_link = ?, manager_owner_name = ?, \
             number_of_units = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&property.name)
        .bind(&property.address)
        .bind(&property.map_link)
        .bind(&property.manager_owner_name)
        .bind(property.number_of_units)
        .bind(property.updated_at)
        .bind(property.id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update property", e))?;

        if result.rows_affected() == 0 && self.find_by_id(property.id).await?.is_none() {
            return Err(DomainError::not_found("Property"));
        }
        Ok(property)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM properties WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete property", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM properties")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to count properties", e))?;
        let total: i64 = column(&row, "total")?;
        Ok(total as u64)
    }
}

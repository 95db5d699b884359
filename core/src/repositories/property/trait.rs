//! Property repository trait

use async_trait::async_trait;

use crate::domain::entities::property::Property;
use crate::errors::DomainError;

#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Every property, ordered by name
    async fn find_all(&self) -> Result<Vec<Property>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Property>, DomainError>;

    async fn create(&self, property: Property) -> Result<Property, DomainError>;

    async fn update(&self, property: Property) -> Result<Property, DomainError>;

    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

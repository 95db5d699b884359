//! In-memory implementation of PropertyRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::property::Property;
use crate::errors::DomainError;
use crate::repositories::IdSequence;

use super::trait_::PropertyRepository;

/// In-memory property repository
pub struct MockPropertyRepository {
    properties: Arc<RwLock<HashMap<i64, Property>>>,
    ids: IdSequence,
}

impl MockPropertyRepository {
    pub fn new() -> Self {
        Self {
            properties: Arc::new(RwLock::new(HashMap::new())),
            ids: IdSequence::new(),
        }
    }
}

impl Default for MockPropertyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyRepository for MockPropertyRepository {
    async fn find_all(&self) -> Result<Vec<Property>, DomainError> {
        let mut all: Vec<Property> = self.properties.read().await.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Property>, DomainError> {
        Ok(self.properties.read().await.get(&id).cloned())
    }

    async fn create(&self, mut property: Property) -> Result<Property, DomainError> {
        property.id = self.ids.next();
        self.properties
            .write()
            .await
            .insert(property.id, property.clone());
        Ok(property)
    }

    async fn update(&self, property: Property) -> Result<Property, DomainError> {
        let mut properties = self.properties.write().await;
        if !properties.contains_key(&property.id) {
            return Err(DomainError::not_found("Property"));
        }
        properties.insert(property.id, property.clone());
        Ok(property)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.properties.write().await.remove(&id).is_some())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.properties.read().await.len() as u64)
    }
}

//! Property catalogue with occupancy figures

use std::sync::Arc;

use crate::domain::entities::property::Property;
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::repositories::{PropertyRepository, TenantRepository};

/// Fields accepted on create and on full update
#[derive(Debug, Clone, Default)]
pub struct PropertyInput {
    pub name: String,
    pub address: String,
    pub map_link: Option<String>,
    pub manager_owner_name: Option<String>,
    pub number_of_units: i32,
}

impl PropertyInput {
    fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }
        if self.address.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "address".to_string(),
            }
            .into());
        }
        if self.number_of_units < 0 {
            return Err(DomainError::validation("numberOfUnits must not be negative"));
        }
        Ok(())
    }
}

/// A property with its current tenant count and free units
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySummary {
    pub property: Property,
    pub current_tenants_count: u64,
    pub vacancies_count: i64,
}

pub struct PropertyService {
    properties: Arc<dyn PropertyRepository>,
    tenants: Arc<dyn TenantRepository>,
}

impl PropertyService {
    pub fn new(properties: Arc<dyn PropertyRepository>, tenants: Arc<dyn TenantRepository>) -> Self {
        Self { properties, tenants }
    }

    pub async fn list(&self) -> DomainResult<Vec<PropertySummary>> {
        let properties = self.properties.find_all().await?;
        let mut summaries = Vec::with_capacity(properties.len());
        for property in properties {
            summaries.push(self.summarize(property).await?);
        }
        Ok(summaries)
    }

    pub async fn get(&self, id: i64) -> DomainResult<PropertySummary> {
        let property = self.find(id).await?;
        self.summarize(property).await
    }

    pub async fn create(&self, input: PropertyInput) -> DomainResult<Property> {
        input.validate()?;
        let mut property = Property::new(input.name, input.address, input.number_of_units);
        property.map_link = input.map_link;
        property.manager_owner_name = input.manager_owner_name;

        let property = self.properties.create(property).await?;
        tracing::info!(property_id = property.id, "Property created");
        Ok(property)
    }

    /// Replaces every editable field
    pub async fn update(&self, id: i64, input: PropertyInput) -> DomainResult<Property> {
        input.validate()?;
        let mut property = self.find(id).await?;
        property.name = input.name;
        property.address = input.address;
        property.map_link = input.map_link;
        property.manager_owner_name = input.manager_owner_name;
        property.number_of_units = input.number_of_units;
        property.touch();
        self.properties.update(property).await
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.properties.delete(id).await? {
            return Err(DomainError::not_found(format!("Property {}", id)));
        }
        tracing::info!(property_id = id, "Property deleted");
        Ok(())
    }

    pub async fn count(&self) -> DomainResult<u64> {
        self.properties.count().await
    }

    async fn find(&self, id: i64) -> DomainResult<Property> {
        self.properties
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Property {}", id)))
    }

    async fn summarize(&self, property: Property) -> DomainResult<PropertySummary> {
        let current = self.tenants.count_by_property(property.id).await?;
        Ok(PropertySummary {
            vacancies_count: property.vacancies(current),
            current_tenants_count: current,
            property,
        })
    }
}

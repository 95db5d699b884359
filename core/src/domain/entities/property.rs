//! Managed building or complex.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub map_link: Option<String>,
    pub manager_owner_name: Option<String>,
    pub number_of_units: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    pub fn new(name: impl Into<String>, address: impl Into<String>, number_of_units: i32) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            address: address.into(),
            map_link: None,
            manager_owner_name: None,
            number_of_units,
            created_at: now,
            updated_at: now,
        }
    }

    /// Units not occupied by `current_tenants`; never negative
    pub fn vacancies(&self, current_tenants: u64) -> i64 {
        (i64::from(self.number_of_units) - current_tenants as i64).max(0)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

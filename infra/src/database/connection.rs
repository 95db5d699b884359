//! MySQL connection pool

use std::fmt;
use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use nbj_shared::DatabaseConfig;

use crate::InfrastructureError;

/// Wrapper around the SQLx pool built from [`DatabaseConfig`]
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
    max_connections: u32,
}

impl DatabasePool {
    /// Connects eagerly so a bad URL fails at startup
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        if !config.url.starts_with("mysql://") {
            return Err(InfrastructureError::Config(
                "database url must start with mysql://".to_string(),
            ));
        }

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .connect(&config.url)
            .await?;

        tracing::info!(max_connections = config.max_connections, "Database pool created");
        Ok(Self {
            pool,
            max_connections: config.max_connections,
        })
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Round trip to the server
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let (one,): (i32,) = sqlx::query_as("SELECT 1").fetch_one(&self.pool).await?;
        Ok(one == 1)
    }

    /// Applies the embedded `migrations/` directory
    pub async fn run_migrations(&self) -> Result<(), InfrastructureError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    pub fn statistics(&self) -> PoolStatistics {
        PoolStatistics {
            connections: self.pool.size(),
            idle_connections: self.pool.num_idle() as u32,
            max_connections: self.max_connections,
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Snapshot of pool usage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatistics {
    pub connections: u32,
    pub idle_connections: u32,
    pub max_connections: u32,
}

impl fmt::Display for PoolStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} connections ({} idle)",
            self.connections, self.max_connections, self.idle_connections
        )
    }
}

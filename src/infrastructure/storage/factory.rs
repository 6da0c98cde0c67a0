//! Backend selection and connection pool construction

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::StorageConfig;
use crate::domain::DomainError;

/// Supported account store backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Open a PostgreSQL pool from the storage section of the config
pub async fn connect_postgres(config: &StorageConfig) -> Result<PgPool, DomainError> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| DomainError::internal("storage.database_url is required for postgres"))?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
}

use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::AppConfig;

use super::memory::MemoryStore;
use super::postgres::PgStore;
use super::store::Store;

/// Errors from the storage backends
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A unique user name is already taken; carries the name.
    #[error("Conflict: {0} already exists")]
    Conflict(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const UNIQUE_VIOLATION: &str = "23505";

impl DatabaseError {
    /// Turn a Postgres unique violation into `Conflict(name)`, pass everything else through.
    pub fn from_write(err: sqlx::Error, name: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                DatabaseError::Conflict(name.to_string())
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}

/// Picks the storage backend from configuration.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Postgres when `database.url` is set, otherwise a fresh in-memory store.
    pub async fn connect(config: &AppConfig) -> Result<Arc<dyn Store>, DatabaseError> {
        match &config.database.url {
            Some(url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .acquire_timeout(Duration::from_secs(config.database.connection_timeout))
                    .connect(url)
                    .await?;
                info!("Connected to Postgres (max {} connections)", config.database.max_connections);
                Ok(Arc::new(PgStore::new(pool)))
            }
            None => {
                info!("DATABASE_URL not set, using in-memory store");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }

    /// Postgres only; used by `migrate`.
    pub async fn connect_postgres(config: &AppConfig) -> Result<PgStore, DatabaseError> {
        let url = config
            .database
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .acquire_timeout(Duration::from_secs(config.database.connection_timeout))
            .connect(url)
            .await?;
        Ok(PgStore::new(pool))
    }
}

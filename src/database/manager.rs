use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::schema;

/// Errors from the data-access layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the connection pool. Cheap to clone; every clone shares the same pool.
#[derive(Clone, Debug)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the configured SQLite database
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if !config.url.starts_with("sqlite:") {
            return Err(DatabaseError::InvalidDatabaseUrl(config.url.clone()));
        }
        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl(config.url.clone()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_with(options)
            .await?;

        info!("Opened database pool for: {}", config.url);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create every table that does not exist yet
    pub async fn init_schema(&self) -> Result<(), DatabaseError> {
        for statement in schema::TABLES.iter().chain(schema::VIEWS) {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!(
            "Database schema ready ({} statements, {} views)",
            schema::TABLES.len(),
            schema::VIEWS.len()
        );
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

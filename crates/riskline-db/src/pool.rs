//! Connection pool wrapper.

use std::time::Duration;

use riskline_core::TrailConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::DbError;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared `PostgreSQL` connection pool.
///
/// Cheap to clone; clones share the same underlying connections.
#[derive(Debug, Clone)]
pub struct DbPool {
    inner: PgPool,
}

impl DbPool {
    /// Connect with the default pool size.
    pub async fn connect(database_url: &str) -> Result<Self, DbError> {
        Self::connect_with(database_url, riskline_core::config::DEFAULT_DB_MAX_CONNECTIONS).await
    }

    /// Connect with an explicit pool size.
    pub async fn connect_with(database_url: &str, max_connections: u32) -> Result<Self, DbError> {
        let inner = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect(database_url)
            .await
            .map_err(DbError::ConnectionFailed)?;

        tracing::info!(max_connections, "Database pool connected");
        Ok(Self { inner })
    }

    /// Connect using `DATABASE_URL` and pool size from configuration.
    pub async fn from_config(config: &TrailConfig) -> Result<Self, DbError> {
        let url = config.require_database_url()?;
        Self::connect_with(url, config.db_max_connections).await
    }

    /// Wrap an already configured pool.
    #[must_use]
    pub fn from_pool(inner: PgPool) -> Self {
        Self { inner }
    }

    /// The underlying `SQLx` pool.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.inner
    }
}

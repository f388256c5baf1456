//! Error types for the riskline-db crate.
//!
//! Wraps `SQLx` errors with context. At the store boundary every `DbError`
//! becomes a `TrailError::Storage`.

use riskline_core::{ConfigError, TrailError};
use thiserror::Error;

/// Database operation errors.
///
/// # Example
///
/// ```rust
/// use riskline_db::DbError;
///
/// fn handle_error(err: DbError) {
///     match err {
///         DbError::ConnectionFailed(e) => eprintln!("Cannot connect: {}", e),
///         DbError::MigrationFailed(e) => eprintln!("Migration error: {}", e),
///         DbError::QueryFailed(e) => eprintln!("Query error: {}", e),
///         DbError::Config(e) => eprintln!("Config: {}", e),
///         DbError::CorruptRow(msg) => eprintln!("Corrupt row: {}", msg),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum DbError {
    /// Failed to establish or acquire a database connection.
    #[error("Database connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    /// A database migration failed to apply.
    #[error("Migration failed: {0}")]
    MigrationFailed(#[source] sqlx::migrate::MigrateError),

    /// A database query failed to execute.
    ///
    /// Includes constraint violations, e.g. a blank `event_type`.
    #[error("Query failed: {0}")]
    QueryFailed(#[source] sqlx::Error),

    /// Connection settings are missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A stored row does not map onto the domain type.
    #[error("Corrupt row: {0}")]
    CorruptRow(String),
}

impl DbError {
    /// Check if this error indicates a connection problem.
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_))
    }

    /// Check if this error indicates a migration problem.
    #[must_use]
    pub fn is_migration_error(&self) -> bool {
        matches!(self, DbError::MigrationFailed(_))
    }

    /// Check if this error indicates a query problem.
    #[must_use]
    pub fn is_query_error(&self) -> bool {
        matches!(self, DbError::QueryFailed(_))
    }
}

impl From<DbError> for TrailError {
    fn from(err: DbError) -> Self {
        TrailError::Storage(err.to_string())
    }
}

//! Error Types
//!
//! # Example
//!
//! ```
//! use riskline_core::{TrailError, Result};
//!
//! fn window(limit: i64) -> Result<usize> {
//!     if limit <= 0 {
//!         return Err(TrailError::invalid_argument("limit", "must be a positive integer"));
//!     }
//!     Ok(limit as usize)
//! }
//!
//! assert!(window(0).unwrap_err().is_invalid_argument());
//! ```

use thiserror::Error;

/// Errors surfaced by the audit and risk profile core.
///
/// Callers decide how to present these; the core never maps them to HTTP.
///
/// # Variants
///
/// - `InvalidArgument` - Malformed or out-of-range input, raised before any store call
/// - `Storage` - The durable medium is unreachable or rejected the operation
/// - `UpsertFailed` - The atomic upsert primitive returned no record
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrailError {
    /// Input validation failure.
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument {
        /// The argument that failed validation
        field: String,
        /// Description of the failure
        message: String,
    },

    /// The underlying store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The atomic upsert returned no record. Unreachable with a correct store.
    #[error("Failed to upsert user risk profile for '{user_id}'")]
    UpsertFailed {
        /// The profile key being upserted
        user_id: String,
    },
}

impl TrailError {
    /// Shorthand for an `InvalidArgument` error.
    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a `Storage` error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Check if this error is an input validation failure.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Check if this error came from the store.
    #[must_use]
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Check if this error is the defensive upsert failure.
    #[must_use]
    pub fn is_upsert_failed(&self) -> bool {
        matches!(self, Self::UpsertFailed { .. })
    }
}

/// Type alias for Results using `TrailError`.
pub type Result<T> = std::result::Result<T, TrailError>;

/// Errors raised while loading [`crate::TrailConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("Missing required configuration: {var}")]
    Missing {
        /// Name of the environment variable
        var: String,
    },

    /// An environment variable holds an unusable value.
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid {
        /// Name of the environment variable
        var: String,
        /// Why the value was rejected
        reason: String,
    },
}

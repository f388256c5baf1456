//! riskline Core Library
//!
//! Shared types for the audit trail and user risk profile subsystem.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (`AuditEventId`, `UserId`)
//! - [`actor`] - Actor attribution and the open metadata mapping
//! - [`error`] - Standardized error types (`TrailError`, `ConfigError`)
//! - [`config`] - Environment driven configuration (`TrailConfig`)
//! - [`telemetry`] - Tracing subscriber bootstrap
//!
//! # Example
//!
//! ```
//! use riskline_core::{Actor, UserId, TrailError, Result};
//!
//! fn profile_key(raw: &str) -> Result<UserId> {
//!     UserId::parse(raw)
//! }
//!
//! assert!(profile_key("u42").is_ok());
//! assert!(matches!(profile_key(""), Err(TrailError::InvalidArgument { .. })));
//!
//! let actor = Actor::with_id("u1");
//! assert!(actor.actor_email.is_none());
//! ```

pub mod actor;
pub mod config;
pub mod error;
pub mod ids;
pub mod telemetry;

// Re-export main types for convenient access
pub use actor::{Actor, Metadata};
pub use config::TrailConfig;
pub use error::{ConfigError, Result, TrailError};
pub use ids::{AuditEventId, ParseIdError, UserId};

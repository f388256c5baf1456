//! riskline Database Layer
//!
//! `PostgreSQL` persistence for the audit trail and user risk profiles,
//! built on `SQLx`.
//!
//! # Modules
//!
//! - [`pool`] - Connection pool wrapper
//! - [`migrations`] - Embedded schema migrations
//! - [`models`] - Row types and their queries
//! - [`stores`] - `AuditStore` and `RiskProfileStore` implementations
//! - [`error`] - Database error types
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use riskline_db::{run_migrations, DbPool, PgAuditStore};
//! use riskline_trail::{AuditLogInput, AuditService, TrailConfig};
//!
//! let config = TrailConfig::from_env()?;
//! let pool = DbPool::from_config(&config).await?;
//! run_migrations(&pool).await?;
//!
//! let audit = AuditService::with_config(Arc::new(PgAuditStore::new(pool)), config);
//! audit.log(AuditLogInput::new("SETTINGS_UPDATED", "update")).await?;
//! ```

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod stores;

pub use error::DbError;
pub use migrations::run_migrations;
pub use pool::DbPool;
pub use stores::{PgAuditStore, PgRiskProfileStore};

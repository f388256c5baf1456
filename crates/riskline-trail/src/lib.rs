//! Audit trail and user risk profile domain logic.
//!
//! Every mutating action in the gateway is recorded as an immutable audit
//! event, and each user carries one mutable risk profile that fraud scoring
//! and access control read and update.
//!
//! # Features
//!
//! - Append-only audit events with bounded, most-recent-first reads
//! - Exactly one risk profile per user, maintained by atomic upsert
//! - Behavioural snapshots (amount, velocity, devices, location changes)
//!   derived from recent transactions
//!
//! # Services
//!
//! The [`services`] module provides business logic for:
//! - [`services::AuditService`] - Validate, normalize and record audit events
//! - [`services::RiskProfileService`] - Upsert and look up user risk profiles
//!
//! # Audit
//!
//! The [`audit`] module provides the storage seam:
//! - [`audit::AuditStore`] trait for pluggable storage backends
//! - [`audit::InMemoryAuditStore`] for testing
//! - [`audit::AuditEvent`] the persisted record

pub mod audit;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use riskline_core::{Actor, Metadata, Result, TrailConfig, TrailError, UserId};
pub use types::{RiskProfileSnapshot, TransactionRecord, UserRiskProfile};

// Re-export service types
pub use services::{
    clamp_recent_limit, AuditLogInput, AuditService, InMemoryRiskProfileStore,
    InMemoryTransactionHistory, RiskProfileService, RiskProfileStore, TransactionHistory,
};

// Re-export audit types
pub use audit::{event_types, AuditEvent, AuditStore, InMemoryAuditStore, NewAuditEvent};

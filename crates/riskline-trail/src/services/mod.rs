//! Service layer for the audit trail and user risk profiles.
//!
//! Services validate and normalize caller input, then delegate to an injected
//! store. They hold no locks of their own: all coordination is left to the
//! store's atomic primitives.

pub mod audit_service;
pub mod risk;

// Re-export commonly used types
pub use audit_service::{clamp_recent_limit, AuditLogInput, AuditService};
pub use risk::{
    InMemoryRiskProfileStore, InMemoryTransactionHistory, RiskProfileService, RiskProfileStore,
    TransactionHistory,
};

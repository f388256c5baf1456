//! Row models and their queries.

pub mod audit_log;
pub mod user_risk_profile;

pub use audit_log::AuditLogRow;
pub use user_risk_profile::UserRiskProfileRow;

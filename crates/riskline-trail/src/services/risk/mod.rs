//! Risk Profile Service for maintaining one scoring record per user.
//!
//! This module provides:
//! - An atomic create-or-merge upsert keyed by user identity
//! - Lookups by user identity
//! - A behavioural snapshot builder fed by recent transactions
//!
//! # Example
//!
//! ```ignore
//! use riskline_trail::services::risk::{
//!     InMemoryRiskProfileStore, InMemoryTransactionHistory, RiskProfileService,
//! };
//! use std::sync::Arc;
//!
//! let service = RiskProfileService::with_history(
//!     Arc::new(InMemoryRiskProfileStore::new()),
//!     Arc::new(InMemoryTransactionHistory::new()),
//! );
//! ```

mod history_store;
mod profile_store;
mod service;

pub use history_store::{InMemoryTransactionHistory, TransactionHistory};
pub use profile_store::{InMemoryRiskProfileStore, RiskProfileStore};
pub use service::RiskProfileService;

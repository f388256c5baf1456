//! Common test utilities for riskline-trail integration tests.
//!
//! All tests use in-memory stores for isolation and speed.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use riskline_core::telemetry;
use riskline_trail::audit::InMemoryAuditStore;
use riskline_trail::services::risk::{
    InMemoryRiskProfileStore, InMemoryTransactionHistory, RiskProfileService,
};
use riskline_trail::services::AuditService;
use riskline_trail::Metadata;

static INIT: Once = Once::new();

/// Initialize logging for tests (once).
///
/// Silent unless `RUST_LOG` is set.
pub fn init_test_logging() {
    INIT.call_once(|| {
        telemetry::init_tracing("off");
    });
}

/// Stores all the in-memory stores for test isolation.
#[derive(Clone)]
pub struct TestStores {
    pub audit_store: Arc<InMemoryAuditStore>,
    pub profile_store: Arc<InMemoryRiskProfileStore>,
    pub transaction_history: Arc<InMemoryTransactionHistory>,
}

impl TestStores {
    /// Create a new set of isolated test stores.
    pub fn new() -> Self {
        Self {
            audit_store: Arc::new(InMemoryAuditStore::new()),
            profile_store: Arc::new(InMemoryRiskProfileStore::new()),
            transaction_history: Arc::new(InMemoryTransactionHistory::new()),
        }
    }
}

/// Services under test, wired to the provided stores.
pub struct TestServices {
    pub audit: AuditService,
    pub risk: RiskProfileService,
}

impl TestServices {
    pub fn new(stores: &TestStores) -> Self {
        Self {
            audit: AuditService::new(stores.audit_store.clone()),
            risk: RiskProfileService::with_history(
                stores.profile_store.clone(),
                stores.transaction_history.clone(),
            ),
        }
    }
}

/// Test context containing stores and services.
pub struct TestContext {
    pub stores: TestStores,
    pub services: Arc<TestServices>,
}

impl TestContext {
    pub fn new() -> Self {
        init_test_logging();
        let stores = TestStores::new();
        let services = Arc::new(TestServices::new(&stores));
        Self { stores, services }
    }
}

/// Build a payload from a JSON object literal.
pub fn payload(value: serde_json::Value) -> Metadata {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

//! Append-only audit trail.
//!
//! Gateway actors record every mutating action (settings changes, simulation
//! runs, risk assessments, case handling) as an [`AuditEvent`]. The
//! [`AuditStore`] trait exposes only `append` and `list_recent`: there is no
//! way to update or delete an event through this crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use riskline_trail::audit::{AuditStore, InMemoryAuditStore, NewAuditEvent};
//!
//! let store = InMemoryAuditStore::new();
//! let event = store
//!     .append(NewAuditEvent::new("SETTINGS_UPDATED", "update"))
//!     .await?;
//! assert_eq!(store.list_recent(1).await?[0].id, event.id);
//! ```

use chrono::{DateTime, Utc};
use riskline_core::{Actor, AuditEventId, Metadata, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

/// Event type tags emitted by gateway actors.
///
/// `event_type` is a free-form category; these are the tags the gateway
/// itself produces.
pub mod event_types {
    /// System settings were changed.
    pub const SETTINGS_UPDATED: &str = "SETTINGS_UPDATED";
    /// A fraud case was opened.
    pub const CASE_CREATED: &str = "CASE_CREATED";
    /// A fraud case changed status or priority.
    pub const CASE_UPDATED: &str = "CASE_UPDATED";
    /// A fraud case was handed to an analyst.
    pub const CASE_ASSIGNED: &str = "CASE_ASSIGNED";
    /// A transaction simulation run was started.
    pub const SIMULATION_STARTED: &str = "SIMULATION_STARTED";
    /// A user's risk was (re)assessed.
    pub const RISK_ASSESSED: &str = "RISK_ASSESSED";
}

/// A persisted audit event. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    /// Store-generated identity.
    pub id: AuditEventId,
    /// Category tag, e.g. `SETTINGS_UPDATED`.
    pub event_type: String,
    /// What happened.
    pub action: String,
    /// Kind of the affected resource, absent for global actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    /// Identifier of the affected resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
    /// Who did it.
    #[serde(flatten)]
    pub actor: Actor,
    /// Additional context. Empty when the caller supplied none.
    #[serde(default)]
    pub metadata: Metadata,
    /// Assigned by the store at persistence time.
    pub created_at: DateTime<Utc>,
}

/// A normalized event ready to be appended.
///
/// Produced by the audit service; stores assign `id` and `created_at`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewAuditEvent {
    pub event_type: String,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub actor: Actor,
    pub metadata: Metadata,
}

impl NewAuditEvent {
    /// Event with no entity reference, anonymous actor and empty metadata.
    pub fn new(event_type: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            action: action.into(),
            ..Self::default()
        }
    }

    fn into_event(self, id: AuditEventId, created_at: DateTime<Utc>) -> AuditEvent {
        AuditEvent {
            id,
            event_type: self.event_type,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            actor: self.actor,
            metadata: self.metadata,
            created_at,
        }
    }
}

/// Trait for audit event storage backends.
///
/// Implementations must make each `append` atomic and must never expose a
/// way to mutate or remove persisted events.
#[async_trait::async_trait]
pub trait AuditStore: Send + Sync {
    /// Persist an event, assigning its identity and `created_at`.
    async fn append(&self, event: NewAuditEvent) -> Result<AuditEvent>;

    /// Most recent events first, at most `limit` of them.
    ///
    /// Events sharing a `created_at` are returned latest-appended first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<AuditEvent>>;
}

/// In-memory audit store for testing.
#[derive(Debug, Default)]
pub struct InMemoryAuditStore {
    // Kept in append order; timestamps are non-decreasing along the vector.
    events: RwLock<Vec<AuditEvent>>,
}

impl InMemoryAuditStore {
    /// Create a new in-memory audit store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    /// Get the count of events in the store.
    pub async fn count(&self) -> usize {
        self.events.read().await.len()
    }

    /// Get all events in append order (for testing).
    pub async fn get_all(&self) -> Vec<AuditEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait::async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn append(&self, event: NewAuditEvent) -> Result<AuditEvent> {
        let mut events = self.events.write().await;

        // Wall clock may step backwards; never let it reorder the trail.
        let now = Utc::now();
        let created_at = events
            .last()
            .map_or(now, |last| last.created_at.max(now));

        let event = event.into_event(AuditEventId::new(), created_at);

        debug!(
            event_id = %event.id,
            event_type = %event.event_type,
            action = %event.action,
            entity_type = ?event.entity_type,
            entity_id = ?event.entity_id,
            actor_id = ?event.actor.actor_id,
            "Audit event appended"
        );

        events.push(event.clone());
        Ok(event)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<AuditEvent>> {
        let events = self.events.read().await;
        Ok(events.iter().rev().take(limit).cloned().collect())
    }
}

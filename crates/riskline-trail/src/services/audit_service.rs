//! Audit service: validation, normalization and bounded history reads.

use std::sync::Arc;

use riskline_core::{Actor, Metadata, Result, TrailConfig, TrailError};
use tracing::{info, warn};

use crate::audit::{AuditEvent, AuditStore, NewAuditEvent};

/// Input for logging an audit event.
///
/// Only `event_type` and `action` are required.
#[derive(Debug, Clone, Default)]
pub struct AuditLogInput {
    /// Category tag, see [`crate::audit::event_types`].
    pub event_type: String,
    /// What happened.
    pub action: String,
    /// Kind of the affected resource.
    pub entity_type: Option<String>,
    /// Identifier of the affected resource.
    pub entity_id: Option<String>,
    /// Who did it. `None` records an anonymous (system) action.
    pub actor: Option<Actor>,
    /// Additional context. `None` is stored as an empty mapping.
    pub metadata: Option<Metadata>,
}

impl AuditLogInput {
    /// Input with the two required fields set.
    pub fn new(event_type: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            action: action.into(),
            ..Self::default()
        }
    }

    /// Reference the affected resource.
    #[must_use]
    pub fn entity(mut self, entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Attribute the action.
    #[must_use]
    pub fn actor(mut self, actor: Actor) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Attach metadata.
    #[must_use]
    pub fn metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    fn normalize(self) -> Result<NewAuditEvent> {
        if self.event_type.trim().is_empty() {
            return Err(TrailError::invalid_argument(
                "event_type",
                "must be a non-empty string",
            ));
        }
        if self.action.trim().is_empty() {
            return Err(TrailError::invalid_argument(
                "action",
                "must be a non-empty string",
            ));
        }

        Ok(NewAuditEvent {
            event_type: self.event_type,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            actor: self.actor.unwrap_or_default(),
            metadata: self.metadata.unwrap_or_default(),
        })
    }
}

/// Clamp a controller-supplied window to `[1, audit_max_limit]`.
///
/// A missing value falls back to `audit_default_limit`. This is the boundary
/// helper for callers; [`AuditService::list_recent`] itself does not clamp.
#[must_use]
pub fn clamp_recent_limit(requested: Option<i64>, config: &TrailConfig) -> i64 {
    requested
        .unwrap_or(config.audit_default_limit)
        .clamp(1, config.audit_max_limit.max(1))
}

/// Records audit events and serves recent history.
pub struct AuditService {
    store: Arc<dyn AuditStore>,
    config: TrailConfig,
}

impl AuditService {
    /// Create a new audit service with default configuration.
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self::with_config(store, TrailConfig::default())
    }

    /// Create a new audit service with explicit configuration.
    pub fn with_config(store: Arc<dyn AuditStore>, config: TrailConfig) -> Self {
        Self { store, config }
    }

    /// The configuration this service was built with.
    #[must_use]
    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    /// Validate, normalize and persist one audit event.
    ///
    /// Store failures are returned to the caller, which decides whether they
    /// affect its own operation. Nothing is retried here.
    pub async fn log(&self, input: AuditLogInput) -> Result<()> {
        let event = input.normalize()?;

        match self.store.append(event).await {
            Ok(event) => {
                info!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    action = %event.action,
                    "Audit event logged"
                );
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Failed to write audit event");
                Err(e)
            }
        }
    }

    /// Most recent events first, at most `limit`.
    ///
    /// `limit` must be positive.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<AuditEvent>> {
        if limit <= 0 {
            return Err(TrailError::invalid_argument(
                "limit",
                format!("must be a positive integer, got {limit}"),
            ));
        }
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        self.store.list_recent(limit).await
    }

    /// Recent events using the configured default window.
    pub async fn list_recent_default(&self) -> Result<Vec<AuditEvent>> {
        self.list_recent(self.config.audit_default_limit).await
    }
}

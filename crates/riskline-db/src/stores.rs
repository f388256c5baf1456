//! `PostgreSQL` implementations of the audit and risk profile stores.

use async_trait::async_trait;
use riskline_core::{AuditEventId, Metadata, Result, TrailError, UserId};
use riskline_trail::{AuditEvent, AuditStore, NewAuditEvent, RiskProfileStore, UserRiskProfile};
use tracing::{debug, warn};

use crate::error::DbError;
use crate::models::{AuditLogRow, UserRiskProfileRow};
use crate::pool::DbPool;

/// Audit store backed by the `audit_logs` table.
#[derive(Debug, Clone)]
pub struct PgAuditStore {
    pool: DbPool,
}

impl PgAuditStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Number of persisted events.
    pub async fn count(&self) -> Result<i64> {
        AuditLogRow::count(self.pool.inner())
            .await
            .map_err(|e| DbError::QueryFailed(e).into())
    }
}

#[async_trait]
impl AuditStore for PgAuditStore {
    async fn append(&self, event: NewAuditEvent) -> Result<AuditEvent> {
        let id = AuditEventId::new();
        let row = AuditLogRow::insert(self.pool.inner(), *id.as_uuid(), event)
            .await
            .map_err(DbError::QueryFailed)?;
        let event = AuditEvent::try_from(row)?;

        debug!(
            event_id = %event.id,
            event_type = %event.event_type,
            action = %event.action,
            entity_type = ?event.entity_type,
            entity_id = ?event.entity_id,
            actor_id = ?event.actor.actor_id,
            "Audit event appended"
        );

        Ok(event)
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<AuditEvent>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = AuditLogRow::list_recent(self.pool.inner(), limit)
            .await
            .map_err(DbError::QueryFailed)?;

        rows.into_iter()
            .map(|row| AuditEvent::try_from(row).map_err(TrailError::from))
            .collect()
    }
}

/// Risk profile store backed by the `user_risk_profiles` table.
#[derive(Debug, Clone)]
pub struct PgRiskProfileStore {
    pool: DbPool,
}

impl PgRiskProfileStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Number of stored profiles.
    pub async fn count(&self) -> Result<i64> {
        UserRiskProfileRow::count(self.pool.inner())
            .await
            .map_err(|e| DbError::QueryFailed(e).into())
    }
}

#[async_trait]
impl RiskProfileStore for PgRiskProfileStore {
    async fn upsert(&self, user_id: &UserId, payload: Metadata) -> Result<UserRiskProfile> {
        let row = UserRiskProfileRow::upsert(self.pool.inner(), user_id, payload)
            .await
            .map_err(DbError::QueryFailed)?;

        let Some(row) = row else {
            warn!(user_id = %user_id, "Upsert returned no profile");
            return Err(TrailError::UpsertFailed {
                user_id: user_id.to_string(),
            });
        };

        Ok(UserRiskProfile::try_from(row)?)
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<UserRiskProfile>> {
        UserRiskProfileRow::find_by_user_id(self.pool.inner(), user_id)
            .await
            .map_err(DbError::QueryFailed)?
            .map(UserRiskProfile::try_from)
            .transpose()
            .map_err(TrailError::from)
    }
}

//! Audit log row model.
//!
//! Rows are inserted once and never touched again; the table rejects
//! UPDATE and DELETE at the trigger level.

use chrono::{DateTime, Utc};
use riskline_core::{Actor, AuditEventId};
use riskline_trail::{AuditEvent, NewAuditEvent};
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgExecutor};
use uuid::Uuid;

use crate::error::DbError;

/// A row of `audit_logs`.
#[derive(Debug, Clone, FromRow)]
pub struct AuditLogRow {
    pub id: Uuid,
    /// Insertion sequence, breaks ties between equal timestamps.
    pub seq: i64,
    pub event_type: String,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub actor_id: Option<String>,
    pub actor_email: Option<String>,
    pub ip_address: Option<String>,
    pub metadata: JsonValue,
    pub created_at: DateTime<Utc>,
}

impl AuditLogRow {
    /// Insert an event. The database assigns `seq` and `created_at`.
    pub async fn insert<'e, E>(
        executor: E,
        id: Uuid,
        event: NewAuditEvent,
    ) -> Result<Self, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Self>(
            r"
            INSERT INTO audit_logs
                (id, event_type, action, entity_type, entity_id,
                 actor_id, actor_email, ip_address, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, seq, event_type, action, entity_type, entity_id,
                      actor_id, actor_email, ip_address, metadata, created_at
            ",
        )
        .bind(id)
        .bind(event.event_type)
        .bind(event.action)
        .bind(event.entity_type)
        .bind(event.entity_id)
        .bind(event.actor.actor_id)
        .bind(event.actor.actor_email)
        .bind(event.actor.ip_address)
        .bind(JsonValue::Object(event.metadata))
        .fetch_one(executor)
        .await
    }

    /// Most recent rows first, at most `limit`.
    pub async fn list_recent<'e, E>(executor: E, limit: i64) -> Result<Vec<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Self>(
            r"
            SELECT id, seq, event_type, action, entity_type, entity_id,
                   actor_id, actor_email, ip_address, metadata, created_at
            FROM audit_logs
            ORDER BY created_at DESC, seq DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(executor)
        .await
    }

    /// Count all rows.
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM audit_logs")
            .fetch_one(executor)
            .await
    }
}

impl TryFrom<AuditLogRow> for AuditEvent {
    type Error = DbError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        let metadata = match row.metadata {
            JsonValue::Object(map) => map,
            other => {
                return Err(DbError::CorruptRow(format!(
                    "audit_logs.metadata for {} is not an object: {other}",
                    row.id
                )))
            }
        };

        Ok(AuditEvent {
            id: AuditEventId::from_uuid(row.id),
            event_type: row.event_type,
            action: row.action,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            actor: Actor {
                actor_id: row.actor_id,
                actor_email: row.actor_email,
                ip_address: row.ip_address,
            },
            metadata,
            created_at: row.created_at,
        })
    }
}

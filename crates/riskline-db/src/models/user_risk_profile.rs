//! User risk profile row model.

use chrono::{DateTime, Utc};
use riskline_core::{Metadata, UserId};
use riskline_trail::UserRiskProfile;
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgExecutor};

use crate::error::DbError;

/// A row of `user_risk_profiles`.
#[derive(Debug, Clone, FromRow)]
pub struct UserRiskProfileRow {
    pub user_id: String,
    pub fields: JsonValue,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRiskProfileRow {
    /// Create the profile or merge `payload` onto it in one statement.
    ///
    /// Top-level keys in `payload` replace stored ones; other stored keys are
    /// kept. The reserved `userId`, `createdAt` and `updatedAt` keys are
    /// dropped from the payload. `None` means the statement returned no row.
    pub async fn upsert<'e, E>(
        executor: E,
        user_id: &UserId,
        payload: Metadata,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Self>(
            r"
            INSERT INTO user_risk_profiles (user_id, fields)
            VALUES ($1, $2::jsonb - 'userId' - 'createdAt' - 'updatedAt')
            ON CONFLICT (user_id) DO UPDATE SET
                fields = user_risk_profiles.fields || EXCLUDED.fields,
                updated_at = clock_timestamp()
            RETURNING user_id, fields, created_at, updated_at
            ",
        )
        .bind(user_id.as_str())
        .bind(JsonValue::Object(payload))
        .fetch_optional(executor)
        .await
    }

    /// Find the profile for a user.
    pub async fn find_by_user_id<'e, E>(
        executor: E,
        user_id: &UserId,
    ) -> Result<Option<Self>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Self>(
            r"
            SELECT user_id, fields, created_at, updated_at
            FROM user_risk_profiles
            WHERE user_id = $1
            ",
        )
        .bind(user_id.as_str())
        .fetch_optional(executor)
        .await
    }

    /// Count all profiles.
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_risk_profiles")
            .fetch_one(executor)
            .await
    }
}

impl TryFrom<UserRiskProfileRow> for UserRiskProfile {
    type Error = DbError;

    fn try_from(row: UserRiskProfileRow) -> Result<Self, Self::Error> {
        let user_id = UserId::parse(row.user_id)
            .map_err(|e| DbError::CorruptRow(format!("user_risk_profiles.user_id: {e}")))?;

        let JsonValue::Object(fields) = row.fields else {
            return Err(DbError::CorruptRow(format!(
                "user_risk_profiles.fields for '{user_id}' is not an object"
            )));
        };

        Ok(UserRiskProfile {
            user_id,
            fields,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

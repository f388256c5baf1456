//! Type definitions for the risk profile domain.

use chrono::{DateTime, Utc};
use riskline_core::{Metadata, UserId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// User Risk Profile
// ============================================================================

/// Keys owned by the profile record itself. Payloads cannot set them.
pub const RESERVED_PROFILE_KEYS: [&str; 3] = ["userId", "createdAt", "updatedAt"];

/// Mutable per-user risk record.
///
/// `fields` is opaque to this crate: fraud scoring and access control decide
/// what they store there. It is serialized flat next to `userId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRiskProfile {
    /// Profile key. Never changes after creation.
    pub user_id: UserId,
    /// Merged scoring fields.
    #[serde(flatten)]
    pub fields: Metadata,
    /// When the profile was first upserted.
    pub created_at: DateTime<Utc>,
    /// When the profile was last upserted.
    pub updated_at: DateTime<Utc>,
}

impl UserRiskProfile {
    /// Create an empty profile.
    #[must_use]
    pub fn new(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            fields: Metadata::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a payload onto the profile. Payload keys win, except
    /// [`RESERVED_PROFILE_KEYS`] which are dropped.
    pub fn merge(&mut self, payload: Metadata, now: DateTime<Utc>) {
        self.fields.extend(
            payload
                .into_iter()
                .filter(|(key, _)| !RESERVED_PROFILE_KEYS.contains(&key.as_str())),
        );
        self.updated_at = now;
    }

    /// Look up a single field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Look up a numeric field.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }
}

// ============================================================================
// Behavioural Snapshot
// ============================================================================

/// A transaction as seen by the profile builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub transaction_id: String,
    pub user_id: UserId,
    pub amount: f64,
    pub device_id: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
}

/// Behavioural features derived from a user's recent transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfileSnapshot {
    /// Mean amount over the last 7 days.
    pub avg_transaction_amount: f64,
    /// Transactions per hour over the last 24 hours.
    pub transaction_velocity: f64,
    /// Distinct devices over the last 24 hours.
    pub device_count: usize,
    /// Share of consecutive 24h transactions whose location differs.
    pub location_change_frequency: f64,
}

impl RiskProfileSnapshot {
    /// Compute the snapshot from the 24h and 7d transaction windows.
    ///
    /// `day` must be ordered by timestamp (either direction) for the location
    /// change count to be meaningful.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_history(day: &[TransactionRecord], week: &[TransactionRecord]) -> Self {
        let avg_transaction_amount = if week.is_empty() {
            0.0
        } else {
            week.iter().map(|tx| tx.amount).sum::<f64>() / week.len() as f64
        };

        let transaction_velocity = day.len() as f64 / 24.0;

        let mut devices: Vec<&str> = day.iter().map(|tx| tx.device_id.as_str()).collect();
        devices.sort_unstable();
        devices.dedup();
        let device_count = devices.len();

        let location_changes = day
            .windows(2)
            .filter(|pair| pair[0].location != pair[1].location)
            .count();
        let location_change_frequency = if day.len() > 1 {
            location_changes as f64 / (day.len() - 1) as f64
        } else {
            0.0
        };

        Self {
            avg_transaction_amount,
            transaction_velocity,
            device_count,
            location_change_frequency,
        }
    }

    /// The snapshot as a profile payload.
    #[must_use]
    pub fn to_payload(&self) -> Metadata {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Metadata::new(),
        }
    }
}

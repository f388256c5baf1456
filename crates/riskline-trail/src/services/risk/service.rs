//! Risk profile service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use riskline_core::{Metadata, Result, TrailError, UserId};
use tracing::debug;

use super::history_store::TransactionHistory;
use super::profile_store::RiskProfileStore;
use crate::types::{RiskProfileSnapshot, UserRiskProfile, RESERVED_PROFILE_KEYS};

/// Upsert and lookup of per-user risk profiles.
///
/// Guarantees exactly one profile per user identity by delegating to the
/// store's atomic upsert. Holds no state of its own.
pub struct RiskProfileService {
    store: Arc<dyn RiskProfileStore>,
    history: Option<Arc<dyn TransactionHistory>>,
}

impl RiskProfileService {
    /// Create a service over a profile store.
    pub fn new(store: Arc<dyn RiskProfileStore>) -> Self {
        Self {
            store,
            history: None,
        }
    }

    /// Create a service that can also build snapshots from transaction history.
    pub fn with_history(
        store: Arc<dyn RiskProfileStore>,
        history: Arc<dyn TransactionHistory>,
    ) -> Self {
        Self {
            store,
            history: Some(history),
        }
    }

    /// Create or merge the profile for `user_id`.
    ///
    /// Fields in `payload` override stored ones; stored fields missing from
    /// `payload` are kept. `userId`, `createdAt` and `updatedAt` keys in the
    /// payload are ignored.
    pub async fn upsert(&self, user_id: &str, payload: Metadata) -> Result<UserRiskProfile> {
        let user_id = UserId::parse(user_id)?;
        let payload = strip_reserved(payload);

        debug!(user_id = %user_id, fields = payload.len(), "Upserting user risk profile");

        self.store.upsert(&user_id, payload).await
    }

    /// Get the profile for `user_id`, if any.
    pub async fn find_by_user_id(&self, user_id: &str) -> Result<Option<UserRiskProfile>> {
        let user_id = UserId::parse(user_id)?;
        self.store.find_by_user_id(&user_id).await
    }

    /// Recompute the behavioural snapshot for `user_id` as of `now` and store it.
    ///
    /// Reads the last 24 hours and the last 7 days of transactions, merges the
    /// four snapshot fields onto the profile and returns the snapshot.
    pub async fn build_and_store(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<RiskProfileSnapshot> {
        let user_id = UserId::parse(user_id)?;
        let history = self.history.as_ref().ok_or_else(|| {
            TrailError::invalid_argument(
                "history",
                "service was created without a transaction history source",
            )
        })?;

        let from_24h = now - Duration::hours(24);
        let from_7d = now - Duration::days(7);

        let (day, week) = tokio::try_join!(
            history.find_by_user_within_window(&user_id, from_24h),
            history.find_by_user_within_window(&user_id, from_7d),
        )?;

        let snapshot = RiskProfileSnapshot::from_history(&day, &week);

        self.store.upsert(&user_id, snapshot.to_payload()).await?;

        debug!(
            user_id = %user_id,
            day_count = day.len(),
            week_count = week.len(),
            device_count = snapshot.device_count,
            "Stored risk profile snapshot"
        );

        Ok(snapshot)
    }
}

fn strip_reserved(mut payload: Metadata) -> Metadata {
    for key in RESERVED_PROFILE_KEYS {
        if payload.remove(key).is_some() {
            debug!(key, "Ignoring reserved key in risk profile payload");
        }
    }
    payload
}

//! Risk profile storage trait and in-memory implementation.

use async_trait::async_trait;
use chrono::Utc;
use riskline_core::{Metadata, Result, UserId};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::types::UserRiskProfile;

/// Trait for storing and retrieving user risk profiles.
#[async_trait]
pub trait RiskProfileStore: Send + Sync {
    /// Atomically create the profile for `user_id` or merge `payload` onto it.
    ///
    /// Must be a single find-and-modify-or-insert primitive, never a read
    /// followed by a write. Returns the full resulting record.
    async fn upsert(&self, user_id: &UserId, payload: Metadata) -> Result<UserRiskProfile>;

    /// Get the profile for a user, if one was ever upserted.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<UserRiskProfile>>;
}

/// In-memory implementation of `RiskProfileStore` for testing.
#[derive(Debug, Default)]
pub struct InMemoryRiskProfileStore {
    profiles: RwLock<HashMap<UserId, UserRiskProfile>>,
}

impl InMemoryRiskProfileStore {
    /// Create a new in-memory profile store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Get count of stored profiles (for testing).
    pub async fn count(&self) -> usize {
        self.profiles.read().await.len()
    }

    /// Get all profiles (for testing).
    pub async fn get_all(&self) -> Vec<UserRiskProfile> {
        self.profiles.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl RiskProfileStore for InMemoryRiskProfileStore {
    async fn upsert(&self, user_id: &UserId, payload: Metadata) -> Result<UserRiskProfile> {
        // One write guard spans lookup, insert and merge.
        let mut profiles = self.profiles.write().await;
        let now = Utc::now();

        let profile = profiles
            .entry(user_id.clone())
            .or_insert_with(|| UserRiskProfile::new(user_id.clone(), now));
        profile.merge(payload, now);

        Ok(profile.clone())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<UserRiskProfile>> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }
}

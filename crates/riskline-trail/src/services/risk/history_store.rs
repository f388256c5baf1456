//! Transaction history source and in-memory implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use riskline_core::{Result, UserId};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::types::TransactionRecord;

/// Read access to a user's past transactions.
///
/// The transaction ledger lives outside this crate; the snapshot builder only
/// needs time-windowed reads.
#[async_trait]
pub trait TransactionHistory: Send + Sync {
    /// Transactions for `user_id` with `timestamp >= from`, newest first.
    async fn find_by_user_within_window(
        &self,
        user_id: &UserId,
        from: DateTime<Utc>,
    ) -> Result<Vec<TransactionRecord>>;
}

/// In-memory implementation of `TransactionHistory` for testing.
#[derive(Debug, Default)]
pub struct InMemoryTransactionHistory {
    transactions: RwLock<HashMap<UserId, Vec<TransactionRecord>>>,
}

impl InMemoryTransactionHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self {
            transactions: RwLock::new(HashMap::new()),
        }
    }

    /// Record a transaction (for testing).
    pub fn record(&self, transaction: TransactionRecord) {
        self.transactions
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(transaction.user_id.clone())
            .or_default()
            .push(transaction);
    }

    /// Get count of all recorded transactions (for testing).
    pub fn count(&self) -> usize {
        self.transactions
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .map(Vec::len)
            .sum()
    }
}

#[async_trait]
impl TransactionHistory for InMemoryTransactionHistory {
    async fn find_by_user_within_window(
        &self,
        user_id: &UserId,
        from: DateTime<Utc>,
    ) -> Result<Vec<TransactionRecord>> {
        let transactions = self.transactions.read().unwrap_or_else(|e| e.into_inner());

        let mut window: Vec<TransactionRecord> = transactions
            .get(user_id)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|tx| tx.timestamp >= from)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        window.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(window)
    }
}

//! Latest-batch cell shared by request handlers

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::quote::QuoteBatch;

/// Holds the most recently fetched quote batch
///
/// Writers swap the whole batch; readers get an `Arc` to an immutable
/// snapshot. Concurrent refreshes resolve last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct QuoteSnapshot {
    latest: Arc<RwLock<Option<Arc<QuoteBatch>>>>,
}

impl QuoteSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current batch, if anything has been stored
    pub async fn get(&self) -> Option<Arc<QuoteBatch>> {
        self.latest.read().await.clone()
    }

    /// Replace the stored batch wholesale, returning the stored handle
    pub async fn replace(&self, batch: QuoteBatch) -> Arc<QuoteBatch> {
        let batch = Arc::new(batch);
        *self.latest.write().await = Some(Arc::clone(&batch));
        tracing::debug!(records = batch.len(), "Quote snapshot replaced");
        batch
    }

    pub async fn is_empty(&self) -> bool {
        self.latest.read().await.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::{BatchOrigin, QuoteRecord};
    use crate::watchlist::fallback_batch;

    #[tokio::test]
    async fn test_starts_empty() {
        let snapshot = QuoteSnapshot::new();
        assert!(snapshot.is_empty().await);
        assert!(snapshot.get().await.is_none());
    }

    #[tokio::test]
    async fn test_replace_supersedes_wholesale() {
        let snapshot = QuoteSnapshot::new();
        snapshot.replace(fallback_batch()).await;

        let live = QuoteBatch::new(vec![QuoteRecord::unavailable("AAPL")], BatchOrigin::Live);
        snapshot.replace(live.clone()).await;

        let current = snapshot.get().await.unwrap();
        assert_eq!(*current, live);
        assert_eq!(current.len(), 1);
    }

    #[tokio::test]
    async fn test_readers_keep_their_snapshot() {
        let snapshot = QuoteSnapshot::new();
        let held = snapshot.replace(fallback_batch()).await;
        snapshot
            .replace(QuoteBatch::new(vec![QuoteRecord::unavailable("AAPL")], BatchOrigin::Live))
            .await;

        assert_eq!(snapshot.get().await.unwrap().len(), 1);
        assert_eq!(held.len(), 6);
        assert_eq!(held.origin(), BatchOrigin::Fallback);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let snapshot = QuoteSnapshot::new();
        let other = snapshot.clone();
        other.replace(fallback_batch()).await;
        assert!(!snapshot.is_empty().await);
    }
}

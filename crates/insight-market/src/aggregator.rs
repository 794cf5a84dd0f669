//! Watchlist aggregation over a quote source

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::quote::{BatchOrigin, QuoteBatch, QuoteRecord};
use crate::watchlist;

/// Something that can produce one normalized quote per symbol
///
/// Implementations never fail: every failure resolves to
/// [`QuoteRecord::unavailable`]. Calls may run concurrently.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quote(&self, symbol: &str) -> QuoteRecord;
}

/// Runs one pass of the quote source over the fixed watchlist
#[derive(Clone)]
pub struct WatchlistAggregator {
    source: Arc<dyn QuoteSource>,
}

impl WatchlistAggregator {
    pub fn new(source: Arc<dyn QuoteSource>) -> Self {
        Self { source }
    }

    /// One record per watchlist symbol, in watchlist order
    ///
    /// Requests are issued concurrently; `join_all` yields results in input
    /// order, so the batch order matches the watchlist regardless of which
    /// request finishes first.
    pub async fn fetch_all_quotes(&self) -> QuoteBatch {
        let symbols: Vec<&'static str> = watchlist::symbols().collect();
        let fetched = join_all(symbols.iter().map(|symbol| self.source.fetch_quote(symbol))).await;

        let records: Vec<QuoteRecord> = symbols
            .iter()
            .zip(fetched)
            .map(|(&symbol, record)| {
                if record.symbol == symbol {
                    record
                } else {
                    warn!(
                        "Quote source answered {} for {symbol}; marking it unavailable",
                        record.symbol
                    );
                    QuoteRecord::unavailable(symbol)
                }
            })
            .collect();

        debug!(
            total = records.len(),
            succeeded = records.iter().filter(|r| r.is_success()).count(),
            "Watchlist pass complete"
        );

        QuoteBatch::new(records, BatchOrigin::Live)
    }

    /// The static fallback batch
    pub fn fallback_quotes(&self) -> QuoteBatch {
        watchlist::fallback_batch()
    }

    /// Fetch the watchlist and apply the substitution policy
    ///
    /// A batch in which every symbol failed is replaced wholesale by the
    /// fallback batch; a partially failed batch is kept as is.
    pub async fn fetch_with_fallback(&self) -> QuoteBatch {
        let batch = self.fetch_all_quotes().await;
        if batch.all_failed() {
            warn!("Using fallback quotes: every watchlist fetch failed");
            self.fallback_quotes()
        } else {
            batch
        }
    }
}

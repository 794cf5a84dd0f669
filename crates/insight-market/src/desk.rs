//! Composition of the pipeline for front ends
//!
//! `MarketDesk` owns the latest-quote snapshot and applies the batch
//! substitution policy, so callers only ever see a live batch with at least
//! one success or the fallback batch.

use insight_llm::LLMProvider;
use insight_llm::providers::AnthropicProvider;
use std::sync::Arc;
use tracing::{info, warn};

use crate::aggregator::{QuoteSource, WatchlistAggregator};
use crate::api::AlphaVantageClient;
use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::narrative::NarrativeGenerator;
use crate::quote::{BatchOrigin, QuoteBatch};
use crate::snapshot::QuoteSnapshot;

/// Quote refresh, question answering and market summaries over one snapshot
#[derive(Clone)]
pub struct MarketDesk {
    aggregator: WatchlistAggregator,
    narrator: NarrativeGenerator,
    snapshot: QuoteSnapshot,
}

impl MarketDesk {
    pub fn new(
        source: Arc<dyn QuoteSource>,
        provider: Arc<dyn LLMProvider>,
        config: &MarketConfig,
    ) -> Self {
        Self {
            aggregator: WatchlistAggregator::new(source),
            narrator: NarrativeGenerator::new(provider, config),
            snapshot: QuoteSnapshot::new(),
        }
    }

    /// Alpha Vantage quotes and Anthropic commentary
    ///
    /// Missing API keys are not fatal: quote requests then come back as error
    /// payloads (and the fallback batch is used) and generation requests fail
    /// into their canned replies.
    pub fn from_config(config: &MarketConfig) -> Result<Self> {
        config.validate()?;

        let av_key = config.alpha_vantage_api_key.clone().unwrap_or_else(|| {
            warn!("ALPHA_VANTAGE_API_KEY not set; live quotes will be unavailable");
            String::new()
        });
        let anthropic_key = config.anthropic_api_key.clone().unwrap_or_else(|| {
            warn!("ANTHROPIC_API_KEY not set; commentary will use fallback text");
            String::new()
        });

        let source = AlphaVantageClient::new(av_key, config.quote_timeout)?;
        let provider = AnthropicProvider::new(anthropic_key, config.generation_timeout)?;

        Ok(Self::new(Arc::new(source), Arc::new(provider), config))
    }

    /// Fetch the watchlist, substitute the fallback if every symbol failed,
    /// and store the result as the latest snapshot
    pub async fn refresh_quotes(&self) -> Arc<QuoteBatch> {
        let batch = self.aggregator.fetch_with_fallback().await;
        match batch.origin() {
            BatchOrigin::Live => info!(
                succeeded = batch.successes().count(),
                total = batch.len(),
                "Quotes refreshed"
            ),
            BatchOrigin::Fallback => info!("Quotes refreshed from fallback data"),
        }
        self.snapshot.replace(batch).await
    }

    /// The latest stored batch, if any refresh has happened
    pub async fn latest_quotes(&self) -> Option<Arc<QuoteBatch>> {
        self.snapshot.get().await
    }

    /// Answer a question against the latest snapshot
    ///
    /// Blank questions are rejected; everything else resolves to text.
    pub async fn ask(&self, message: &str) -> Result<String> {
        if message.trim().is_empty() {
            return Err(MarketError::EmptyQuestion);
        }

        let batch = self.latest_quotes().await;
        let records = batch.as_deref().map(QuoteBatch::records).unwrap_or_default();
        Ok(self.narrator.answer_question(message, records).await)
    }

    /// Market summary over the latest snapshot, refreshing first if there is none
    pub async fn market_summary(&self) -> String {
        let batch = match self.latest_quotes().await {
            Some(batch) => batch,
            None => self.refresh_quotes().await,
        };
        self.narrator.summarize_market(batch.records()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts;
    use crate::quote::QuoteRecord;
    use async_trait::async_trait;
    use insight_llm::{CompletionRequest, CompletionResponse, LLMError};
    use mockall::mock;

    mock! {
        pub Source {}

        #[async_trait]
        impl QuoteSource for Source {
            async fn fetch_quote(&self, symbol: &str) -> QuoteRecord;
        }
    }

    mock! {
        pub Provider {}

        #[async_trait]
        impl LLMProvider for Provider {
            async fn complete(&self, request: CompletionRequest) -> insight_llm::Result<CompletionResponse>;
            fn name(&self) -> &'static str;
        }
    }

    fn failing_source() -> MockSource {
        let mut source = MockSource::new();
        source
            .expect_fetch_quote()
            .returning(|symbol| QuoteRecord::unavailable(symbol));
        source
    }

    fn failing_provider() -> MockProvider {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .returning(|_| Err(LLMError::AuthenticationFailed));
        provider.expect_name().return_const("mock");
        provider
    }

    fn desk(source: MockSource, provider: MockProvider) -> MarketDesk {
        MarketDesk::new(Arc::new(source), Arc::new(provider), &MarketConfig::default())
    }

    #[tokio::test]
    async fn test_refresh_substitutes_fallback_and_stores_it() {
        let desk = desk(failing_source(), MockProvider::new());
        assert!(desk.latest_quotes().await.is_none());

        let batch = desk.refresh_quotes().await;
        assert_eq!(batch.origin(), BatchOrigin::Fallback);
        assert!(batch.records().iter().all(QuoteRecord::is_success));

        let stored = desk.latest_quotes().await.unwrap();
        assert!(Arc::ptr_eq(&batch, &stored));
    }

    #[tokio::test]
    async fn test_refresh_keeps_partial_live_data() {
        let mut source = MockSource::new();
        source.expect_fetch_quote().returning(|symbol| {
            if symbol == "AAPL" {
                QuoteRecord::success(symbol, 178.42, 2.15, "1.22")
            } else {
                QuoteRecord::unavailable(symbol)
            }
        });

        let batch = desk(source, MockProvider::new()).refresh_quotes().await;
        assert_eq!(batch.origin(), BatchOrigin::Live);
        assert_eq!(batch.successes().count(), 1);
    }

    #[tokio::test]
    async fn test_blank_question_rejected() {
        let mut provider = MockProvider::new();
        provider.expect_complete().never();
        let desk = desk(failing_source(), provider);

        assert!(matches!(desk.ask("").await, Err(MarketError::EmptyQuestion)));
        assert!(matches!(desk.ask("  \n\t").await, Err(MarketError::EmptyQuestion)));
    }

    #[tokio::test]
    async fn test_ask_without_snapshot_still_answers() {
        let desk = desk(failing_source(), failing_provider());
        let answer = desk.ask("Which stock should I buy today?").await.unwrap();
        assert_eq!(answer, prompts::APOLOGY);
    }

    #[tokio::test]
    async fn test_summary_refreshes_empty_snapshot() {
        let desk = desk(failing_source(), failing_provider());

        let summary = desk.market_summary().await;
        assert_eq!(summary, "Market mixed: 4 up, 2 down. NVDA leads at +2.87%.");
        assert!(desk.latest_quotes().await.is_some());
    }

    #[tokio::test]
    async fn test_summary_reuses_existing_snapshot() {
        let mut source = MockSource::new();
        source
            .expect_fetch_quote()
            .times(6)
            .returning(|symbol| QuoteRecord::unavailable(symbol));
        let desk = desk(source, failing_provider());

        desk.refresh_quotes().await;
        desk.market_summary().await;
        desk.market_summary().await;
    }

    #[test]
    fn test_from_config_without_keys() {
        let config = MarketConfig::default();
        assert!(MarketDesk::from_config(&config).is_ok());
    }
}

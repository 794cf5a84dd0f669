//! Commentary generation over quote batches
//!
//! Both entry points issue at most one provider request and always resolve to
//! text: provider failures are logged and replaced by a fixed reply.

use insight_llm::{CompletionRequest, LLMError, LLMProvider, Message};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::MarketConfig;
use crate::prompts;
use crate::quote::QuoteRecord;
use crate::stats::derive_statistics;

/// Turns questions and quote batches into prose via an LLM provider
#[derive(Clone)]
pub struct NarrativeGenerator {
    provider: Arc<dyn LLMProvider>,
    model: String,
    answer_max_tokens: usize,
    summary_max_tokens: usize,
}

impl NarrativeGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, config: &MarketConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            answer_max_tokens: config.answer_max_tokens,
            summary_max_tokens: config.summary_max_tokens,
        }
    }

    /// Answer a free-text question with the success records as context
    ///
    /// Returns [`prompts::APOLOGY`] when the provider fails.
    pub async fn answer_question(&self, user_message: &str, records: &[QuoteRecord]) -> String {
        let request = CompletionRequest::builder(&self.model)
            .system(prompts::FINANCIAL_ASSISTANT)
            .max_tokens(self.answer_max_tokens)
            .add_message(Message::user(prompts::question_prompt(records, user_message)))
            .build();

        match self.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Error calling {} API: {e}", self.provider.name());
                prompts::APOLOGY.to_string()
            }
        }
    }

    /// Short market outlook from advancer/decliner counts and extreme performers
    ///
    /// Skips the provider entirely when there is no success record; on
    /// provider failure builds the sentence from the statistics directly.
    pub async fn summarize_market(&self, records: &[QuoteRecord]) -> String {
        let Some(stats) = derive_statistics(records) else {
            debug!("No successful quotes to summarize");
            return prompts::SUMMARY_UNAVAILABLE.to_string();
        };

        let request = CompletionRequest::builder(&self.model)
            .max_tokens(self.summary_max_tokens)
            .add_message(Message::user(prompts::summary_prompt(&stats)))
            .build();

        match self.generate(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Error generating market summary: {e}");
                prompts::summary_fallback(&stats)
            }
        }
    }

    async fn generate(&self, request: CompletionRequest) -> insight_llm::Result<String> {
        let response = self.provider.complete(request).await?;
        debug!(tokens = response.usage.total(), "Completion received");

        response
            .text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| LLMError::EmptyCompletion(self.provider.name().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watchlist::fallback_batch;
    use async_trait::async_trait;
    use insight_llm::{CompletionResponse, StopReason, TokenUsage};
    use mockall::mock;

    mock! {
        pub Provider {}

        #[async_trait]
        impl LLMProvider for Provider {
            async fn complete(&self, request: CompletionRequest) -> insight_llm::Result<CompletionResponse>;
            fn name(&self) -> &'static str;
        }
    }

    fn reply(text: &str) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    fn generator(provider: MockProvider) -> NarrativeGenerator {
        NarrativeGenerator::new(Arc::new(provider), &MarketConfig::default())
    }

    fn failing_provider() -> MockProvider {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .returning(|_| Err(LLMError::RequestFailed("connection reset".to_string())));
        provider.expect_name().return_const("mock");
        provider
    }

    #[tokio::test]
    async fn test_answer_sends_context_and_persona() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .withf(|request| {
                let user = request.user_text().unwrap_or_default();
                request.system.as_deref() == Some(prompts::FINANCIAL_ASSISTANT)
                    && request.max_tokens == 300
                    && user.contains("- NVDA (NVIDIA Corporation): $441.78 (+12.34, 2.87%)")
                    && user.ends_with("User question: Is NVDA overheated?")
            })
            .returning(|_| Ok(reply("  NVDA is extended but momentum is strong.  ")));

        let answer = generator(provider)
            .answer_question("Is NVDA overheated?", fallback_batch().records())
            .await;
        assert_eq!(answer, "NVDA is extended but momentum is strong.");
    }

    #[tokio::test]
    async fn test_answer_failure_returns_apology() {
        let answer = generator(failing_provider())
            .answer_question("What's your market outlook?", fallback_batch().records())
            .await;
        assert_eq!(answer, prompts::APOLOGY);
        assert!(!answer.is_empty());
    }

    #[tokio::test]
    async fn test_empty_completion_is_a_failure() {
        let mut provider = MockProvider::new();
        provider.expect_complete().returning(|_| Ok(reply("")));
        provider.expect_name().return_const("mock");

        let answer = generator(provider).answer_question("Hello?", &[]).await;
        assert_eq!(answer, prompts::APOLOGY);
    }

    #[tokio::test]
    async fn test_summary_unavailable_skips_provider() {
        let mut provider = MockProvider::new();
        provider.expect_complete().never();
        let generator = generator(provider);

        assert_eq!(generator.summarize_market(&[]).await, prompts::SUMMARY_UNAVAILABLE);

        let failed = [QuoteRecord::unavailable("AAPL"), QuoteRecord::unavailable("MSFT")];
        assert_eq!(generator.summarize_market(&failed).await, prompts::SUMMARY_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_summary_uses_provider_text() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .times(1)
            .withf(|request| {
                request.system.is_none()
                    && request.max_tokens == 150
                    && request
                        .user_text()
                        .is_some_and(|t| t.contains("Best performer: NVDA (+2.87%)"))
            })
            .returning(|_| Ok(reply("Tech strength carried the session.")));

        let summary = generator(provider).summarize_market(fallback_batch().records()).await;
        assert_eq!(summary, "Tech strength carried the session.");
    }

    #[tokio::test]
    async fn test_summary_failure_uses_statistics() {
        let summary = generator(failing_provider())
            .summarize_market(fallback_batch().records())
            .await;
        assert_eq!(summary, "Market mixed: 4 up, 2 down. NVDA leads at +2.87%.");
    }
}

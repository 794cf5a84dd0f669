//! Configuration for quote fetching and commentary generation

use crate::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Configuration for the market pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Alpha Vantage API key (requests without one get an error payload back)
    #[serde(skip_serializing)]
    pub alpha_vantage_api_key: Option<String>,

    /// Anthropic API key (generation falls back to canned text without one)
    #[serde(skip_serializing)]
    pub anthropic_api_key: Option<String>,

    /// Model identifier sent with every generation request
    pub model: String,

    /// Upper bound for a single quote request
    pub quote_timeout: Duration,

    /// Upper bound for a single generation request
    pub generation_timeout: Duration,

    /// Token ceiling for question answers
    pub answer_max_tokens: usize,

    /// Token ceiling for market summaries
    pub summary_max_tokens: usize,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_api_key: None,
            anthropic_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            quote_timeout: Duration::from_secs(10),
            generation_timeout: Duration::from_secs(60),
            answer_max_tokens: 300,
            summary_max_tokens: 150,
        }
    }
}

impl MarketConfig {
    /// Create a new configuration builder
    pub fn builder() -> MarketConfigBuilder {
        MarketConfigBuilder::default()
    }

    /// Defaults plus API keys and model from the environment
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env_api_keys().with_env_model().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(MarketError::ConfigError("model must not be empty".to_string()));
        }

        if self.quote_timeout.is_zero() || self.generation_timeout.is_zero() {
            return Err(MarketError::ConfigError(
                "request timeouts must be greater than 0".to_string(),
            ));
        }

        if self.answer_max_tokens == 0 || self.summary_max_tokens == 0 {
            return Err(MarketError::ConfigError(
                "max token limits must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for MarketConfig
#[derive(Debug, Default)]
pub struct MarketConfigBuilder {
    alpha_vantage_api_key: Option<String>,
    anthropic_api_key: Option<String>,
    model: Option<String>,
    quote_timeout: Option<Duration>,
    generation_timeout: Option<Duration>,
    answer_max_tokens: Option<usize>,
    summary_max_tokens: Option<usize>,
}

impl MarketConfigBuilder {
    /// Set Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Set Anthropic API key
    pub fn anthropic_api_key(mut self, key: impl Into<String>) -> Self {
        self.anthropic_api_key = Some(key.into());
        self
    }

    /// Set the generation model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the quote request timeout
    pub fn quote_timeout(mut self, duration: Duration) -> Self {
        self.quote_timeout = Some(duration);
        self
    }

    /// Set the generation request timeout
    pub fn generation_timeout(mut self, duration: Duration) -> Self {
        self.generation_timeout = Some(duration);
        self
    }

    /// Set the token ceiling for answers
    pub fn answer_max_tokens(mut self, tokens: usize) -> Self {
        self.answer_max_tokens = Some(tokens);
        self
    }

    /// Set the token ceiling for summaries
    pub fn summary_max_tokens(mut self, tokens: usize) -> Self {
        self.summary_max_tokens = Some(tokens);
        self
    }

    /// Load `ALPHA_VANTAGE_API_KEY` and `ANTHROPIC_API_KEY` when not set explicitly
    pub fn with_env_api_keys(mut self) -> Self {
        if self.alpha_vantage_api_key.is_none() {
            self.alpha_vantage_api_key = non_empty_env("ALPHA_VANTAGE_API_KEY");
        }
        if self.anthropic_api_key.is_none() {
            self.anthropic_api_key = non_empty_env("ANTHROPIC_API_KEY");
        }
        self
    }

    /// Load `MARKET_INSIGHT_MODEL` when no model was set explicitly
    pub fn with_env_model(mut self) -> Self {
        if self.model.is_none() {
            self.model = non_empty_env("MARKET_INSIGHT_MODEL");
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MarketConfig> {
        let defaults = MarketConfig::default();

        let config = MarketConfig {
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            anthropic_api_key: self.anthropic_api_key,
            model: self.model.unwrap_or(defaults.model),
            quote_timeout: self.quote_timeout.unwrap_or(defaults.quote_timeout),
            generation_timeout: self.generation_timeout.unwrap_or(defaults.generation_timeout),
            answer_max_tokens: self.answer_max_tokens.unwrap_or(defaults.answer_max_tokens),
            summary_max_tokens: self.summary_max_tokens.unwrap_or(defaults.summary_max_tokens),
        };

        config.validate()?;
        Ok(config)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

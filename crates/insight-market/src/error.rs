//! Error types for market data and commentary operations

use thiserror::Error;

/// Market pipeline errors
///
/// Quote-level variants never reach callers of the watchlist operations; the
/// fetcher logs them and collapses every one into an `error` quote record.
/// [`MarketError::EmptyQuestion`] is the only variant that crosses the public
/// boundary of [`crate::MarketDesk`].
#[derive(Debug, Error)]
pub enum MarketError {
    /// The provider payload had no usable `Global Quote` section
    #[error("No quote for {symbol}: {reason}")]
    MissingQuote { symbol: String, reason: String },

    /// A quote field was present but not numeric
    #[error("Malformed {field} value {value:?}")]
    MalformedField { field: &'static str, value: String },

    /// Provider answered with a non-success HTTP status
    #[error("Quote provider returned HTTP {0}")]
    HttpStatus(u16),

    /// Network or HTTP error, including timeouts
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Blank user question
    #[error("Message cannot be empty")]
    EmptyQuestion,

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Text-generation provider could not be constructed
    #[error("LLM provider error: {0}")]
    ProviderError(#[from] insight_llm::LLMError),
}

/// Result type alias for market operations
pub type Result<T> = std::result::Result<T, MarketError>;

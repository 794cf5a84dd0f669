//! Alpha Vantage `GLOBAL_QUOTE` client

use crate::aggregator::QuoteSource;
use crate::error::{MarketError, Result};
use crate::quote::{QuoteRecord, normalize_percent};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const BASE_URL: &str = "https://www.alphavantage.co/query";

const GLOBAL_QUOTE_KEY: &str = "Global Quote";
const PRICE_FIELD: &str = "05. price";
const CHANGE_FIELD: &str = "09. change";
const CHANGE_PERCENT_FIELD: &str = "10. change percent";

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client
    ///
    /// # Arguments
    /// * `api_key` - Alpha Vantage API key
    /// * `timeout` - Upper bound for one quote request; expiry counts as a failed fetch
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Override the query endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get the raw global quote payload
    pub async fn get_quote(&self, symbol: &str) -> Result<Value> {
        let params = [
            ("function", "GLOBAL_QUOTE"),
            ("symbol", symbol),
            ("apikey", self.api_key.as_str()),
        ];

        let response = self.client.get(&self.base_url).query(&params).send().await?;

        if !response.status().is_success() {
            return Err(MarketError::HttpStatus(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }

    /// Fetch and normalize one quote, keeping the failure cause
    pub async fn try_fetch_quote(&self, symbol: &str) -> Result<QuoteRecord> {
        let data = self.get_quote(symbol).await?;
        parse_global_quote(symbol, &data)
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageClient {
    #[instrument(skip(self))]
    async fn fetch_quote(&self, symbol: &str) -> QuoteRecord {
        match self.try_fetch_quote(symbol).await {
            Ok(record) => {
                debug!(price = record.price, change = record.change, "Quote fetched");
                record
            }
            Err(e) => {
                warn!("Error fetching {symbol}: {e}");
                QuoteRecord::unavailable(symbol)
            }
        }
    }
}

/// Normalize a `GLOBAL_QUOTE` payload into a success record
///
/// Rate-limit notes, error messages and unknown symbols all arrive as a
/// payload without a populated `Global Quote` object.
pub fn parse_global_quote(symbol: &str, data: &Value) -> Result<QuoteRecord> {
    let quote = data
        .get(GLOBAL_QUOTE_KEY)
        .and_then(Value::as_object)
        .filter(|quote| !quote.is_empty())
        .ok_or_else(|| MarketError::MissingQuote {
            symbol: symbol.to_string(),
            reason: provider_message(data),
        })?;

    let price = number_field(quote, PRICE_FIELD)?;
    let change = number_field(quote, CHANGE_FIELD)?;
    let change_percent = normalize_percent(str_field(quote, CHANGE_PERCENT_FIELD)?)?;

    Ok(QuoteRecord::success(symbol, price, change, change_percent))
}

fn str_field<'a>(quote: &'a Map<String, Value>, name: &'static str) -> Result<&'a str> {
    quote
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| MarketError::MalformedField {
            field: name,
            value: quote.get(name).map(Value::to_string).unwrap_or_default(),
        })
}

fn number_field(quote: &Map<String, Value>, name: &'static str) -> Result<f64> {
    let raw = str_field(quote, name)?;
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MarketError::MalformedField {
            field: name,
            value: raw.to_string(),
        })
}

fn provider_message(data: &Value) -> String {
    ["Error Message", "Note", "Information"]
        .iter()
        .find_map(|key| data.get(*key).and_then(Value::as_str))
        .map_or_else(|| "missing Global Quote".to_string(), str::to_string)
}

//! Canonical quote records and batches

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MarketError, Result};
use crate::watchlist;

/// Whether a record carries real market data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    Success,
    Error,
}

/// One symbol's market snapshot at fetch time
///
/// Numeric fields of an [`QuoteStatus::Error`] record are placeholders. Branch
/// on [`QuoteRecord::is_success`], never on the numbers themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub symbol: String,
    pub company: String,
    pub price: f64,
    pub change: f64,
    /// Signed percentage without the trailing `%`
    pub change_percent: String,
    pub status: QuoteStatus,
}

impl QuoteRecord {
    /// Build a success record, rounding price and change to cents
    pub fn success(
        symbol: impl Into<String>,
        price: f64,
        change: f64,
        change_percent: impl Into<String>,
    ) -> Self {
        let symbol = symbol.into();
        Self {
            company: watchlist::company_name(&symbol).to_string(),
            symbol,
            price: round_cents(price),
            change: round_cents(change),
            change_percent: change_percent.into(),
            status: QuoteStatus::Success,
        }
    }

    /// Placeholder record for a symbol whose quote could not be obtained
    pub fn unavailable(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            company: watchlist::company_name(&symbol).to_string(),
            symbol,
            price: 0.0,
            change: 0.0,
            change_percent: "0.00".to_string(),
            status: QuoteStatus::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == QuoteStatus::Success
    }

    /// `change_percent` as a number, if it parses
    pub fn change_percent_value(&self) -> Option<f64> {
        parse_percent(&self.change_percent).ok()
    }
}

/// Where a batch came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOrigin {
    /// Fetched from the market-data provider (possibly with failed symbols)
    Live,
    /// The static fallback table
    Fallback,
}

/// One pass over the watchlist, in watchlist order
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteBatch {
    records: Vec<QuoteRecord>,
    origin: BatchOrigin,
    fetched_at: DateTime<Utc>,
}

impl QuoteBatch {
    pub fn new(records: Vec<QuoteRecord>, origin: BatchOrigin) -> Self {
        Self {
            records,
            origin,
            fetched_at: Utc::now(),
        }
    }

    /// Empty live batch, used before anything has been fetched
    pub fn empty() -> Self {
        Self::new(Vec::new(), BatchOrigin::Live)
    }

    pub fn records(&self) -> &[QuoteRecord] {
        &self.records
    }

    pub fn origin(&self) -> BatchOrigin {
        self.origin
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records with real data, in order
    pub fn successes(&self) -> impl Iterator<Item = &QuoteRecord> {
        self.records.iter().filter(|r| r.is_success())
    }

    /// True when every record failed; an empty batch counts as failed
    pub fn all_failed(&self) -> bool {
        self.records.iter().all(|r| !r.is_success())
    }
}

/// Round to two fractional digits
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse a provider percent string such as `"1.2200%"` or `"-0.5"`
pub fn parse_percent(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MarketError::MalformedField {
            field: "change percent",
            value: raw.to_string(),
        })
}

/// Strip the trailing `%` from a provider percent string, checking it is numeric
pub fn normalize_percent(raw: &str) -> Result<String> {
    parse_percent(raw)?;
    let trimmed = raw.trim();
    Ok(trimmed.strip_suffix('%').unwrap_or(trimmed).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_with_and_without_sign() {
        assert_eq!(parse_percent("1.22").unwrap(), 1.22);
        assert_eq!(parse_percent("1.22%").unwrap(), 1.22);
        assert_eq!(parse_percent(" -0.4515% ").unwrap(), -0.4515);
    }

    #[test]
    fn test_percent_rejects_garbage() {
        assert!(parse_percent("").is_err());
        assert!(parse_percent("%").is_err());
        assert!(parse_percent("abc%").is_err());
        assert!(parse_percent("NaN").is_err());
        assert!(parse_percent("inf%").is_err());
    }

    #[test]
    fn test_normalize_percent_strips_sign() {
        assert_eq!(normalize_percent("1.2200%").unwrap(), "1.2200");
        assert_eq!(normalize_percent("-1.28").unwrap(), "-1.28");
        assert!(normalize_percent("n/a").is_err());
    }

    #[test]
    fn test_success_rounds_to_cents() {
        let record = QuoteRecord::success("AAPL", 178.4249, 2.146, "1.22");
        assert_eq!(record.price, 178.42);
        assert_eq!(record.change, 2.15);
        assert_eq!(record.company, "Apple Inc.");
        assert!(record.is_success());
    }

    #[test]
    fn test_unavailable_placeholders() {
        let record = QuoteRecord::unavailable("MSFT");
        assert_eq!(record.status, QuoteStatus::Error);
        assert_eq!(record.price, 0.0);
        assert_eq!(record.change, 0.0);
        assert_eq!(record.change_percent, "0.00");
        assert_eq!(record.company, "Microsoft Corporation");
    }

    #[test]
    fn test_unknown_symbol_uses_symbol_as_company() {
        assert_eq!(QuoteRecord::unavailable("IBM").company, "IBM");
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(QuoteRecord::success("NVDA", 441.78, 12.34, "2.87")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "symbol": "NVDA",
                "company": "NVIDIA Corporation",
                "price": 441.78,
                "change": 12.34,
                "change_percent": "2.87",
                "status": "success"
            })
        );
    }

    #[test]
    fn test_all_failed() {
        let failed = QuoteBatch::new(
            vec![QuoteRecord::unavailable("AAPL"), QuoteRecord::unavailable("MSFT")],
            BatchOrigin::Live,
        );
        assert!(failed.all_failed());
        assert!(QuoteBatch::empty().all_failed());

        let partial = QuoteBatch::new(
            vec![
                QuoteRecord::unavailable("AAPL"),
                QuoteRecord::success("MSFT", 384.91, 5.67, "1.49"),
            ],
            BatchOrigin::Live,
        );
        assert!(!partial.all_failed());
        assert_eq!(partial.successes().count(), 1);
    }
}

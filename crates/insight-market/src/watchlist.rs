//! The fixed watchlist and its static fallback quotes

use crate::quote::{BatchOrigin, QuoteBatch, QuoteRecord};

/// A tracked symbol and its display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub symbol: &'static str,
    pub company: &'static str,
}

/// Tracked symbols, in display order
pub const WATCHLIST: [WatchlistEntry; 6] = [
    WatchlistEntry { symbol: "AAPL", company: "Apple Inc." },
    WatchlistEntry { symbol: "MSFT", company: "Microsoft Corporation" },
    WatchlistEntry { symbol: "GOOGL", company: "Alphabet Inc." },
    WatchlistEntry { symbol: "NVDA", company: "NVIDIA Corporation" },
    WatchlistEntry { symbol: "AMZN", company: "Amazon.com Inc." },
    WatchlistEntry { symbol: "TSLA", company: "Tesla Inc." },
];

// (symbol, price, change, change percent)
const FALLBACK_QUOTES: [(&str, f64, f64, &str); 6] = [
    ("AAPL", 178.42, 2.15, "1.22"),
    ("MSFT", 384.91, 5.67, "1.49"),
    ("GOOGL", 141.25, -1.83, "-1.28"),
    ("NVDA", 441.78, 12.34, "2.87"),
    ("AMZN", 145.23, 0.89, "0.62"),
    ("TSLA", 238.45, -4.21, "-1.74"),
];

/// Symbols in watchlist order
pub fn symbols() -> impl Iterator<Item = &'static str> {
    WATCHLIST.iter().map(|entry| entry.symbol)
}

/// Display name for a symbol, or the symbol itself when it is not tracked
pub fn company_name(symbol: &str) -> &str {
    WATCHLIST
        .iter()
        .find(|entry| entry.symbol == symbol)
        .map_or(symbol, |entry| entry.company)
}

/// Static all-success batch used when live data is wholly unavailable
pub fn fallback_batch() -> QuoteBatch {
    let records = FALLBACK_QUOTES
        .iter()
        .map(|&(symbol, price, change, percent)| QuoteRecord::success(symbol, price, change, percent))
        .collect();
    QuoteBatch::new(records, BatchOrigin::Fallback)
}

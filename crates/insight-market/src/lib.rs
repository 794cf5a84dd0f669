//! Watchlist quotes and market commentary
//!
//! This crate turns a noisy, partially failing quote feed into a consistent
//! batch of records and hands derived figures to a text-generation provider.
//! It includes:
//!
//! - Quote fetching and normalization from Alpha Vantage (`GLOBAL_QUOTE`)
//! - Watchlist aggregation with a static fallback batch
//! - Market statistics (advancers, decliners, best and worst performers)
//! - Question answering and market summaries that never fail outward
//! - `MarketDesk`, which owns the latest-quote snapshot for front ends
//!
//! # Example
//!
//! ```rust,no_run
//! use insight_market::{MarketConfig, MarketDesk};
//!
//! #[tokio::main]
//! async fn main() -> insight_market::Result<()> {
//!     let config = MarketConfig::from_env()?;
//!     let desk = MarketDesk::from_config(&config)?;
//!
//!     let quotes = desk.refresh_quotes().await;
//!     println!("{} quotes", quotes.len());
//!     println!("{}", desk.market_summary().await);
//!     println!("{}", desk.ask("What are the current market risks?").await?);
//!
//!     Ok(())
//! }
//! ```

pub mod aggregator;
pub mod api;
pub mod config;
pub mod desk;
pub mod error;
pub mod narrative;
pub mod prompts;
pub mod quote;
pub mod snapshot;
pub mod stats;
pub mod watchlist;

// Re-export main types for convenience
pub use aggregator::{QuoteSource, WatchlistAggregator};
pub use api::AlphaVantageClient;
pub use config::MarketConfig;
pub use desk::MarketDesk;
pub use error::{MarketError, Result};
pub use narrative::NarrativeGenerator;
pub use quote::{BatchOrigin, QuoteBatch, QuoteRecord, QuoteStatus};
pub use snapshot::QuoteSnapshot;
pub use stats::{MarketStatistics, derive_statistics};
pub use watchlist::{WATCHLIST, fallback_batch};

//! User-turn builders

use std::fmt::Write;

use crate::quote::QuoteRecord;
use crate::stats::MarketStatistics;

/// Price lines for every success record; empty when there are none
///
/// ```text
/// Current stock prices:
/// - AAPL (Apple Inc.): $178.42 (+2.15, 1.22%)
/// ```
pub fn stock_context(records: &[QuoteRecord]) -> String {
    let mut context = String::new();
    for record in records.iter().filter(|r| r.is_success()) {
        if context.is_empty() {
            context.push_str("Current stock prices:\n");
        }
        let _ = writeln!(
            context,
            "- {} ({}): ${:.2} ({:+.2}, {}%)",
            record.symbol, record.company, record.price, record.change, record.change_percent
        );
    }
    context
}

/// User turn for a question, prefixed by the price context
pub fn question_prompt(records: &[QuoteRecord], user_message: &str) -> String {
    format!("{}\n\nUser question: {user_message}", stock_context(records))
}

/// User turn asking for a short outlook from derived statistics
pub fn summary_prompt(stats: &MarketStatistics) -> String {
    format!(
        "Based on these {total} major stocks, give a brief market summary:

{up} stocks are up, {down} stocks are down out of {total} total.
Best performer: {best} ({best_pct}%)
Worst performer: {worst} ({worst_pct}%)

Provide a 2-3 sentence market outlook based on this data.",
        total = stats.successful_count,
        up = stats.advancers,
        down = stats.decliners,
        best = stats.best_performer.symbol,
        best_pct = signed_percent(&stats.best_performer.change_percent),
        worst = stats.worst_performer.symbol,
        worst_pct = signed_percent(&stats.worst_performer.change_percent),
    )
}

/// One-sentence summary built without any generative call
pub fn summary_fallback(stats: &MarketStatistics) -> String {
    format!(
        "Market mixed: {} up, {} down. {} leads at {}%.",
        stats.advancers,
        stats.decliners,
        stats.best_performer.symbol,
        signed_percent(&stats.best_performer.change_percent),
    )
}

/// Prefix a `+` unless the value already carries a sign
fn signed_percent(percent: &str) -> String {
    let percent = percent.trim();
    if percent.starts_with('-') || percent.starts_with('+') {
        percent.to_string()
    } else {
        format!("+{percent}")
    }
}

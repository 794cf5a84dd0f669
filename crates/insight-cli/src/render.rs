//! Terminal rendering of quote batches

use comfy_table::Table;
use insight_market::{BatchOrigin, QuoteBatch};

/// Table of the batch with a one-line caption
pub fn quotes_table(batch: &QuoteBatch) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Symbol", "Company", "Price", "Change", "Change %"]);

    for record in batch.records() {
        if record.is_success() {
            table.add_row(vec![
                record.symbol.clone(),
                record.company.clone(),
                format!("${:.2}", record.price),
                format!("{:+.2}", record.change),
                format!("{}%", record.change_percent),
            ]);
        } else {
            table.add_row(vec![
                record.symbol.clone(),
                record.company.clone(),
                "unavailable".to_string(),
                "-".to_string(),
                "-".to_string(),
            ]);
        }
    }

    format!("{table}\n{}", caption(batch))
}

/// The batch records as a pretty-printed JSON array
pub fn quotes_json(batch: &QuoteBatch) -> serde_json::Result<String> {
    serde_json::to_string_pretty(batch.records())
}

fn caption(batch: &QuoteBatch) -> String {
    let as_of = batch.fetched_at().format("%Y-%m-%d %H:%M:%S UTC");
    match batch.origin() {
        BatchOrigin::Live => format!(
            "{} of {} quotes live as of {as_of}",
            batch.successes().count(),
            batch.len()
        ),
        BatchOrigin::Fallback => format!("Live quotes unavailable; showing sample data ({as_of})"),
    }
}

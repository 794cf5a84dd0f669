//! Aggregate figures derived from a quote batch

use crate::quote::QuoteRecord;

/// Advancers, decliners and extreme performers over the success records
#[derive(Debug, Clone, PartialEq)]
pub struct MarketStatistics {
    pub advancers: usize,
    pub decliners: usize,
    pub successful_count: usize,
    pub best_performer: QuoteRecord,
    pub worst_performer: QuoteRecord,
}

/// Derive statistics from the success records of a batch
///
/// Returns `None` when no record carries real data, or when none of the
/// success records has a numeric `change_percent`. Performers are ranked by
/// the numeric value of `change_percent`; records whose percent does not parse
/// still count toward the totals but are never best or worst. Ties keep the
/// earliest record.
pub fn derive_statistics(records: &[QuoteRecord]) -> Option<MarketStatistics> {
    let (mut advancers, mut decliners, mut successful_count) = (0, 0, 0);
    let mut best: Option<(&QuoteRecord, f64)> = None;
    let mut worst: Option<(&QuoteRecord, f64)> = None;

    for record in records.iter().filter(|r| r.is_success()) {
        successful_count += 1;
        if record.change > 0.0 {
            advancers += 1;
        } else if record.change < 0.0 {
            decliners += 1;
        }

        let Some(key) = record.change_percent_value() else {
            continue;
        };
        if best.is_none_or(|(_, top)| key > top) {
            best = Some((record, key));
        }
        if worst.is_none_or(|(_, bottom)| key < bottom) {
            worst = Some((record, key));
        }
    }

    let ((best_performer, _), (worst_performer, _)) = best.zip(worst)?;
    Some(MarketStatistics {
        advancers,
        decliners,
        successful_count,
        best_performer: best_performer.clone(),
        worst_performer: worst_performer.clone(),
    })
}

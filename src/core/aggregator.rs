//! Per-instance aggregation
//!
//! A pass always starts from an empty result: nothing is carried over from a
//! previous aggregation except the quote book, which only gains zero entries
//! for instances seen for the first time.

use super::normalizer::RowNormalizer;
use crate::config::ReportConfig;
use crate::types::{AggregationResult, QuoteBook, RawRow};
use tracing::debug;

pub struct Aggregator<'c> {
    normalizer: RowNormalizer<'c>,
}

impl<'c> Aggregator<'c> {
    pub fn new(config: &'c ReportConfig) -> Self {
        Self {
            normalizer: RowNormalizer::new(config),
        }
    }

    /// Fold rows into per-instance counters, grouped in first-seen order.
    pub fn aggregate(&self, rows: &[RawRow]) -> AggregationResult {
        let mut result = AggregationResult::new();
        for row in rows {
            let normalized = self.normalizer.normalize(row);
            result
                .entry(&normalized.instance_id)
                .record(normalized.status_kind());
        }
        debug!(
            rows = rows.len(),
            instances = result.len(),
            "aggregated reservations"
        );
        result
    }

    /// Aggregate and carry the quote book forward: existing quotes are kept,
    /// new instances get a zero entry.
    pub fn aggregate_with_quotes(
        &self,
        rows: &[RawRow],
        quotes: &QuoteBook,
    ) -> (AggregationResult, QuoteBook) {
        let result = self.aggregate(rows);
        let quotes = quotes.merged_with(&result);
        (result, quotes)
    }
}

/// Convenience wrapper over [`Aggregator::aggregate_with_quotes`].
pub fn aggregate(
    rows: &[RawRow],
    config: &ReportConfig,
    quotes: &QuoteBook,
) -> (AggregationResult, QuoteBook) {
    Aggregator::new(config).aggregate_with_quotes(rows, quotes)
}

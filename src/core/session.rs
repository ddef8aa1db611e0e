//! Command-driven report session
//!
//! Each user action is one method call that fully rebuilds the aggregation
//! (when the row set changes) and returns the new [`ReportView`]. A failed
//! command leaves every piece of state exactly as it was, including the
//! filter flag.

use super::aggregator::Aggregator;
use super::conversion::parse_quote_input;
use super::filter::{apply_filter, clear_filter, DateRange};
use crate::config::ReportConfig;
use crate::error::{ReservasError, ReservasResult};
use crate::report::{ReportInputs, ReportView};
use crate::types::{AggregationResult, DateFilterState, QuoteBook, RawRow, Snapshot};
use chrono::NaiveDate;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct ReportSession {
    config: ReportConfig,
    source: Option<String>,
    original: Snapshot,
    active: Snapshot,
    filter: DateFilterState,
    aggregation: AggregationResult,
    quotes: QuoteBook,
    global_quotes: u64,
}

impl ReportSession {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Replace both snapshots with `rows` and reset the filter. Quotes entered
    /// earlier in the session are kept. Rows without any cell are dropped; if
    /// none remain it is `EmptyInput` and the previous data stays loaded.
    pub fn on_file_loaded(
        &mut self,
        source: impl Into<String>,
        rows: Vec<RawRow>,
    ) -> ReservasResult<ReportView> {
        let source = source.into();
        let rows: Vec<RawRow> = rows.into_iter().filter(|row| !row.is_empty()).collect();
        if rows.is_empty() {
            warn!(source = %source, "no reservation rows in upload");
            return Err(ReservasError::EmptyInput);
        }

        info!(source = %source, rows = rows.len(), "reservations loaded");
        self.source = Some(source);
        self.original = Snapshot::new(rows);
        self.active = self.original.clone();
        self.filter = DateFilterState::inactive();
        self.reaggregate();
        Ok(self.view())
    }

    /// Restrict the active snapshot to `[start, end]` and re-aggregate.
    ///
    /// On `MissingDate`, `InvertedRange` or `EmptyResult` nothing changes: the
    /// active rows, the aggregation and the filter state are those from before
    /// the call.
    pub fn on_filter_applied(
        &mut self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> ReservasResult<ReportView> {
        let range = DateRange::new(start, end)?;
        if self.original.is_empty() {
            return Err(ReservasError::EmptyInput);
        }

        let filtered = match apply_filter(&self.original, &range, &self.config.columns) {
            Ok(filtered) => filtered,
            Err(e) => {
                warn!(start = %range.start(), end = %range.end(), "filter rejected: {}", e);
                return Err(e);
            }
        };

        info!(
            start = %range.start(),
            end = %range.end(),
            rows = filtered.len(),
            "date filter applied"
        );
        self.active = filtered;
        self.filter = DateFilterState::active(range.start(), range.end());
        self.reaggregate();
        Ok(self.view())
    }

    pub fn on_filter_cleared(&mut self) -> ReportView {
        info!("date filter cleared");
        self.active = clear_filter(&self.original);
        self.filter = DateFilterState::inactive();
        self.reaggregate();
        self.view()
    }

    /// Set the quote count of one instance from raw user input.
    pub fn on_quote_changed(&mut self, instance: &str, input: &str) -> ReportView {
        let quotes = parse_quote_input(input);
        info!(instance, quotes, "instance quotes updated");
        self.quotes.set(instance, quotes);
        self.view()
    }

    /// Set the global quote count from raw user input.
    pub fn on_global_quotes_changed(&mut self, input: &str) -> ReportView {
        self.global_quotes = parse_quote_input(input);
        info!(quotes = self.global_quotes, "global quotes updated");
        self.view()
    }

    pub fn view(&self) -> ReportView {
        ReportView::assemble(ReportInputs {
            source: self.source.as_deref(),
            aggregation: &self.aggregation,
            quotes: &self.quotes,
            global_quotes: self.global_quotes,
            filter: &self.filter,
            rows_shown: self.active.len(),
            rows_total: self.original.len(),
            top_n: self.config.top_n,
        })
    }

    fn reaggregate(&mut self) {
        let aggregator = Aggregator::new(&self.config);
        let (aggregation, quotes) = aggregator.aggregate_with_quotes(self.active.rows(), &self.quotes);
        self.aggregation = aggregation;
        self.quotes = quotes;
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        !self.original.is_empty()
    }

    pub fn original(&self) -> &Snapshot {
        &self.original
    }

    pub fn active(&self) -> &Snapshot {
        &self.active
    }

    pub fn filter(&self) -> &DateFilterState {
        &self.filter
    }

    pub fn aggregation(&self) -> &AggregationResult {
        &self.aggregation
    }

    pub fn quotes(&self) -> &QuoteBook {
        &self.quotes
    }

    pub fn global_quotes(&self) -> u64 {
        self.global_quotes
    }
}

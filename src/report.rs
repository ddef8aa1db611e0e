//! Report assembly
//!
//! Read-only view over an aggregation: ranking, top-N, totals, conversions and
//! filter status. Every output (terminal, xlsx, YAML/JSON, HTTP) renders this
//! structure and nothing else.

use crate::core::conversion::{GlobalConversion, InstanceConversion};
use crate::core::dates::format_date;
use crate::types::{AggregationResult, DateFilterState, GlobalTotals, InstanceStats, QuoteBook};
use serde::Serialize;

/// Everything the assembler reads.
pub struct ReportInputs<'a> {
    pub source: Option<&'a str>,
    pub aggregation: &'a AggregationResult,
    pub quotes: &'a QuoteBook,
    pub global_quotes: u64,
    pub filter: &'a DateFilterState,
    pub rows_shown: usize,
    pub rows_total: usize,
    pub top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub source: Option<String>,
    pub filter: FilterStatus,
    pub totals: GlobalTotals,
    pub top: Vec<TopEntry>,
    /// Ranked by total, descending
    pub instances: Vec<InstanceReport>,
    pub global: GlobalConversion,
    pub quotes: QuoteBook,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceReport {
    #[serde(flatten)]
    pub stats: InstanceStats,
    pub conversion: InstanceConversion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopEntry {
    pub rank: usize,
    pub name: String,
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterStatus {
    pub active: bool,
    pub start: Option<String>,
    pub end: Option<String>,
    pub rows_shown: usize,
    pub rows_total: usize,
}

impl FilterStatus {
    /// One-line description of an active filter.
    pub fn summary(&self) -> Option<String> {
        if !self.active {
            return None;
        }
        Some(format!(
            "Showing {} reservations from {} to {}",
            self.rows_shown,
            self.start.as_deref().unwrap_or("?"),
            self.end.as_deref().unwrap_or("?")
        ))
    }
}

impl ReportView {
    pub fn assemble(inputs: ReportInputs<'_>) -> Self {
        let totals = inputs.aggregation.totals();

        let instances: Vec<InstanceReport> = inputs
            .aggregation
            .ranked()
            .into_iter()
            .map(|stats| InstanceReport {
                conversion: InstanceConversion::new(stats, inputs.quotes.get(&stats.name)),
                stats: stats.clone(),
            })
            .collect();

        let top = instances
            .iter()
            .take(inputs.top_n)
            .enumerate()
            .map(|(idx, report)| TopEntry {
                rank: idx + 1,
                name: report.stats.name.clone(),
                total: report.stats.total,
            })
            .collect();

        Self {
            source: inputs.source.map(str::to_string),
            filter: FilterStatus {
                active: inputs.filter.active,
                start: inputs.filter.start.map(format_date),
                end: inputs.filter.end.map(format_date),
                rows_shown: inputs.rows_shown,
                rows_total: inputs.rows_total,
            },
            global: GlobalConversion::new(&totals, inputs.global_quotes),
            totals,
            top,
            instances,
            quotes: inputs.quotes.clone(),
        }
    }

    pub fn instance(&self, name: &str) -> Option<&InstanceReport> {
        self.instances.iter().find(|r| r.stats.name == name)
    }
}

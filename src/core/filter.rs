//! Date range filter over the original snapshot

use super::dates::row_date;
use crate::config::ColumnMapping;
use crate::error::{ReservasError, ReservasResult};
use crate::types::Snapshot;
use chrono::{NaiveDate, NaiveDateTime};

/// A validated, inclusive full-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Both dates are required (`MissingDate`), then `start <= end`
    /// (`InvertedRange`), in that order.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ReservasResult<Self> {
        let (start, end) = match (start, end) {
            (Some(start), Some(end)) => (start, end),
            _ => return Err(ReservasError::MissingDate),
        };
        if start > end {
            return Err(ReservasError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `start 00:00:00 <= at <= end 23:59:59`
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let lower = self.start.and_hms_opt(0, 0, 0);
        let upper = self.end.and_hms_opt(23, 59, 59);
        match (lower, upper) {
            (Some(lower), Some(upper)) => lower <= at && at <= upper,
            _ => false,
        }
    }
}

/// Rows of `original` whose creation date falls in `range`, order preserved.
/// Rows without a usable date never match. An empty selection is an
/// `EmptyResult` error so callers keep their current snapshot.
pub fn apply_filter(
    original: &Snapshot,
    range: &DateRange,
    columns: &ColumnMapping,
) -> ReservasResult<Snapshot> {
    let filtered: Snapshot = original
        .iter()
        .filter(|row| {
            row_date(row.get(&columns.created_at)).is_some_and(|at| range.contains(at))
        })
        .cloned()
        .collect();

    if filtered.is_empty() {
        return Err(ReservasError::EmptyResult {
            start: range.start,
            end: range.end,
        });
    }
    Ok(filtered)
}

/// Clearing the filter is the identity on the original snapshot.
pub fn clear_filter(original: &Snapshot) -> Snapshot {
    original.clone()
}

use crate::core::normalizer::ReservationStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

//==============================================================================
// Raw Input
//==============================================================================

/// A single spreadsheet cell. Absent cells are simply missing from the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0" (instance ids are often numeric)
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// One spreadsheet row keyed by column label ("B", "U", "Z", ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: BTreeMap<String, CellValue>,
}

/// `null` cells are read as absent.
impl<'de> Deserialize<'de> for RawRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cells = BTreeMap::<String, Option<CellValue>>::deserialize(deserializer)?;
        Ok(Self {
            cells: cells
                .into_iter()
                .filter_map(|(column, value)| value.map(|value| (column, value)))
                .collect(),
        })
    }
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures and inline API payloads.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }
}

/// Ordered row set. The original snapshot is captured once per load; the
/// active one is either the original or an order-preserving subset of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    rows: Vec<RawRow>,
}

impl Snapshot {
    pub fn new(rows: Vec<RawRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RawRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<RawRow>> for Snapshot {
    fn from(rows: Vec<RawRow>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<RawRow> for Snapshot {
    fn from_iter<I: IntoIterator<Item = RawRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//==============================================================================
// Aggregation Output
//==============================================================================

/// Per-instance status counters.
///
/// `total` counts every row of the instance, so rows whose status is not one
/// of the four known labels land in `unrecognized` and `total` only:
/// `total == confirmed + pending + failed + processing + unrecognized`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStats {
    pub name: String,
    pub confirmed: u64,
    pub pending: u64,
    pub failed: u64,
    pub processing: u64,
    pub unrecognized: u64,
    pub total: u64,
}

impl InstanceStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn record(&mut self, status: ReservationStatus) {
        match status {
            ReservationStatus::Confirmed => self.confirmed += 1,
            ReservationStatus::Pending => self.pending += 1,
            ReservationStatus::Failed => self.failed += 1,
            ReservationStatus::Processing => self.processing += 1,
            ReservationStatus::Unrecognized => self.unrecognized += 1,
        }
        self.total += 1;
    }

    /// Sum of the four known status buckets.
    pub fn recognized(&self) -> u64 {
        self.confirmed + self.pending + self.failed + self.processing
    }
}

/// Instance identifier -> counters, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationResult {
    instances: Vec<InstanceStats>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl AggregationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for `name`, created on first sight.
    pub(crate) fn entry(&mut self, name: &str) -> &mut InstanceStats {
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                self.instances.push(InstanceStats::new(name));
                let idx = self.instances.len() - 1;
                self.index.insert(name.to_string(), idx);
                idx
            }
        };
        &mut self.instances[idx]
    }

    pub fn get(&self, name: &str) -> Option<&InstanceStats> {
        self.index.get(name).map(|&idx| &self.instances[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Instances in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, InstanceStats> {
        self.instances.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.instances.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instances by `total` descending. The sort is stable, so ties keep
    /// first-seen order.
    pub fn ranked(&self) -> Vec<&InstanceStats> {
        let mut ranked: Vec<&InstanceStats> = self.instances.iter().collect();
        ranked.sort_by(|a, b| b.total.cmp(&a.total));
        ranked
    }

    pub fn totals(&self) -> GlobalTotals {
        let mut totals = GlobalTotals {
            instances: self.instances.len(),
            ..GlobalTotals::default()
        };
        for stats in &self.instances {
            totals.reservations += stats.total;
            totals.confirmed += stats.confirmed;
            totals.pending += stats.pending;
            totals.failed += stats.failed;
            totals.processing += stats.processing;
            totals.unrecognized += stats.unrecognized;
        }
        totals
    }
}

/// Sums of every [`InstanceStats`] field across all instances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalTotals {
    pub reservations: u64,
    pub confirmed: u64,
    pub pending: u64,
    pub failed: u64,
    pub processing: u64,
    pub unrecognized: u64,
    pub instances: usize,
}

//==============================================================================
// Session Inputs
//==============================================================================

/// User-entered quote counts per instance. Survives re-aggregation and
/// filter changes; unknown instances read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteBook {
    entries: BTreeMap<String, u64>,
}

impl QuoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, instance: &str) -> u64 {
        self.entries.get(instance).copied().unwrap_or(0)
    }

    pub fn set(&mut self, instance: impl Into<String>, quotes: u64) {
        self.entries.insert(instance.into(), quotes);
    }

    pub fn contains(&self, instance: &str) -> bool {
        self.entries.contains_key(instance)
    }

    /// Copy of this book with a zero entry for every instance of `result`
    /// not yet present. Existing values are kept.
    pub fn merged_with(&self, result: &AggregationResult) -> QuoteBook {
        let mut merged = self.clone();
        for name in result.names() {
            merged.entries.entry(name.to_string()).or_insert(0);
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Date filter flag and bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFilterState {
    pub active: bool,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateFilterState {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn active(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            active: true,
            start: Some(start),
            end: Some(end),
        }
    }
}

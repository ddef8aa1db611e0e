//! Row normalization: pull the instance, status and creation date out of a raw row.

use crate::config::{ColumnMapping, ReportConfig};
use crate::types::{CellValue, RawRow};
use serde::{Deserialize, Serialize};

/// Reservation status buckets. Labels are matched case-insensitively after
/// trimming; anything else (including an empty cell) is `Unrecognized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Confirmed,
    Pending,
    Failed,
    Processing,
    Unrecognized,
}

impl ReservationStatus {
    pub fn classify(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "confirmada" => ReservationStatus::Confirmed,
            "pendiente" => ReservationStatus::Pending,
            "fallida" => ReservationStatus::Failed,
            "procesando" => ReservationStatus::Processing,
            _ => ReservationStatus::Unrecognized,
        }
    }

    /// Spreadsheet label for the known buckets
    pub fn label(&self) -> Option<&'static str> {
        match self {
            ReservationStatus::Confirmed => Some("confirmada"),
            ReservationStatus::Pending => Some("pendiente"),
            ReservationStatus::Failed => Some("fallida"),
            ReservationStatus::Processing => Some("procesando"),
            ReservationStatus::Unrecognized => None,
        }
    }
}

/// The three fields the engine reads from a row.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow<'a> {
    pub instance_id: String,
    /// Trimmed status text, original casing
    pub status: String,
    pub raw_date: Option<&'a CellValue>,
}

impl NormalizedRow<'_> {
    pub fn status_kind(&self) -> ReservationStatus {
        ReservationStatus::classify(&self.status)
    }
}

pub struct RowNormalizer<'c> {
    columns: &'c ColumnMapping,
    fallback_instance: &'c str,
}

impl<'c> RowNormalizer<'c> {
    pub fn new(config: &'c ReportConfig) -> Self {
        Self {
            columns: &config.columns,
            fallback_instance: &config.fallback_instance,
        }
    }

    pub fn normalize<'r>(&self, row: &'r RawRow) -> NormalizedRow<'r> {
        let instance_id = match row.get(&self.columns.instance) {
            Some(CellValue::Text(s)) if s.is_empty() => self.fallback_instance.to_string(),
            Some(value) => value.to_string(),
            None => self.fallback_instance.to_string(),
        };

        let status = row
            .get(&self.columns.status)
            .map(|value| value.to_string().trim().to_string())
            .unwrap_or_default();

        NormalizedRow {
            instance_id,
            status,
            raw_date: row.get(&self.columns.created_at),
        }
    }
}

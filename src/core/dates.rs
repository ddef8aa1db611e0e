//! Date handling for the creation-date column and the filter inputs
//!
//! Rows carry their creation date either as text (`2026-02-16 12:14:21`,
//! only the date portion counts) or as a spreadsheet serial number. Both map
//! to a naive wall-clock `NaiveDateTime`; filter bounds are naive too, so the
//! comparison is the same as comparing local times.

use crate::error::{ReservasError, ReservasResult};
use crate::types::CellValue;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Days between the spreadsheet epoch (1899-12-30) and 1970-01-01.
pub const SERIAL_UNIX_EPOCH_OFFSET: f64 = 25569.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Convert a spreadsheet serial date to a timestamp:
/// `unix_seconds = (serial - 25569) * 86400`.
///
/// The fraction is the time of day. Conversion goes through whole
/// milliseconds so `46054.99998842593` lands on 23:59:59 instead of a
/// float-noise neighbour. Non-finite or out-of-range serials yield `None`.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let millis = ((serial - SERIAL_UNIX_EPOCH_OFFSET) * MILLIS_PER_DAY).round();
    if millis.abs() >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.naive_utc())
}

/// Parse the date portion of `YYYY-MM-DD HH:MM:SS` (or ISO `YYYY-MM-DDTHH:MM:SS`)
/// as midnight of that day.
pub fn parse_date_text(text: &str) -> Option<NaiveDateTime> {
    let date_part = text.trim().split([' ', 'T']).next()?;
    let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()?;
    date.and_hms_opt(0, 0, 0)
}

/// Creation date of a row, or `None` when the cell is absent or unparseable.
pub fn row_date(value: Option<&CellValue>) -> Option<NaiveDateTime> {
    match value? {
        CellValue::Text(text) => parse_date_text(text),
        CellValue::Number(serial) => serial_to_datetime(*serial),
    }
}

/// Parse a user-entered filter date (`YYYY-MM-DD`). Blank or invalid input is
/// treated as "no date".
pub fn parse_filter_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Filter bound as typed by the user. Absent or blank is `Ok(None)` and left
/// to the range check; anything else must be a valid `YYYY-MM-DD` date.
pub fn parse_filter_input(input: Option<&str>) -> ReservasResult<Option<NaiveDate>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_filter_date(text)
            .map(Some)
            .ok_or_else(|| ReservasError::InvalidDate(text.to_string())),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

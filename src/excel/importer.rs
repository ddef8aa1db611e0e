//! Excel importer implementation - first worksheet → reservation rows

use crate::error::{ReservasError, ReservasResult};
use crate::types::{CellValue, RawRow};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::{Path, PathBuf};

const SUPPORTED_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Reads the first worksheet of a workbook into rows keyed by column letter.
pub struct ExcelImporter {
    path: PathBuf,
    header_rows: usize,
}

impl ExcelImporter {
    /// Create a new importer that skips one header row
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            header_rows: 1,
        }
    }

    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }

    /// Whether the file extension is a spreadsheet format we can read
    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false)
    }

    /// Import data rows (header rows and blank rows excluded).
    pub fn import(&self) -> ReservasResult<Vec<RawRow>> {
        if !Self::is_supported(&self.path) {
            return Err(ReservasError::UnsupportedFile(self.path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| ReservasError::Import(format!("Failed to open workbook: {}", e)))?;

        let range = match workbook.worksheet_range_at(0) {
            Some(Ok(range)) => range,
            Some(Err(e)) => {
                return Err(ReservasError::Import(format!(
                    "Failed to read first worksheet: {}",
                    e
                )))
            }
            None => return Ok(Vec::new()),
        };

        let rows = self.rows_from_range(&range);
        tracing::debug!(
            path = %self.path.display(),
            rows = rows.len(),
            "imported reservation sheet"
        );
        Ok(rows)
    }

    /// Convert a used range into rows. Column letters are absolute, so a
    /// range starting at column C still yields "C" keys.
    fn rows_from_range(&self, range: &Range<Data>) -> Vec<RawRow> {
        let first_col = range.start().map(|(_, col)| col as usize).unwrap_or(0);

        range
            .rows()
            .skip(self.header_rows)
            .filter_map(|cells| {
                let mut row = RawRow::new();
                for (offset, cell) in cells.iter().enumerate() {
                    if let Some(value) = Self::convert_cell(cell) {
                        row.insert(Self::number_to_column_letter(first_col + offset), value);
                    }
                }
                (!row.is_empty()).then_some(row)
            })
            .collect()
    }

    /// Empty and error cells are absent; dates stay numeric serials.
    fn convert_cell(cell: &Data) -> Option<CellValue> {
        match cell {
            Data::String(s) => Some(CellValue::Text(s.clone())),
            Data::Float(f) => Some(CellValue::Number(*f)),
            Data::Int(i) => Some(CellValue::Number(*i as f64)),
            Data::DateTime(dt) => Some(CellValue::Number(dt.as_f64())),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
            Data::Bool(b) => Some(CellValue::Text(b.to_string())),
            _ => None,
        }
    }

    /// Convert column index to Excel column letter (0→A, 1→B, 25→Z, 26→AA, etc.)
    pub fn number_to_column_letter(n: usize) -> String {
        let mut result = String::new();
        let mut num = n;

        loop {
            let remainder = num % 26;
            result.insert(0, (b'A' + remainder as u8) as char);
            if num < 26 {
                break;
            }
            num = num / 26 - 1;
        }

        result
    }
}

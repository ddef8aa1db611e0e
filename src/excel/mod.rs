//! Excel import/export module
//!
//! - Import: reservation workbook (.xlsx/.xls/.ods) → rows keyed by column letter
//! - Export: report view → .xlsx summary workbook

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::ExcelImporter;

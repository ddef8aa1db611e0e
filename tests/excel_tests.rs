//! Excel import/export tests
//!
//! Fixtures are written with rust_xlsxwriter into a TempDir, then read back
//! through the importer (and calamine for exported reports).

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use royalbit_reservas::config::ReportConfig;
use royalbit_reservas::core::ReportSession;
use royalbit_reservas::error::ReservasError;
use royalbit_reservas::excel::{ExcelExporter, ExcelImporter};
use royalbit_reservas::types::CellValue;
use royalbit_reservas::writer::{write_report, ReportFormat};
use rust_xlsxwriter::{Format, Workbook};
use std::path::PathBuf;
use tempfile::TempDir;

/// Export-like sheet: header row, instance in B, status in U, created in Z.
/// Dates are written as serials with a date format, like real exports.
fn create_export(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
    let sheet = workbook.add_worksheet();
    sheet.set_name("Reservas").unwrap();

    sheet.write_string(0, 0, "ID").unwrap();
    sheet.write_string(0, 1, "Instancia").unwrap();
    sheet.write_string(0, 20, "Estado").unwrap();
    sheet.write_string(0, 25, "Creado").unwrap();

    let rows: [(&str, &str, f64); 5] = [
        ("Hotel Sol", "Confirmada", 46054.5),  // 2026-02-01 12:00
        ("Hotel Sol", "pendiente", 46062.0),   // 2026-02-09
        ("Hotel Mar", "CONFIRMADA", 46085.25), // 2026-03-04 06:00
        ("", "Fallida", 46055.0),              // 2026-02-02
        ("Hotel Luna", "Procesando", 46020.0), // 2025-12-29
    ];
    for (i, (instance, status, created)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, (i + 1) as f64).unwrap();
        if !instance.is_empty() {
            sheet.write_string(row, 1, *instance).unwrap();
        }
        sheet.write_string(row, 20, *status).unwrap();
        sheet
            .write_number_with_format(row, 25, *created, &date_format)
            .unwrap();
    }

    // Second sheet is never read
    let other = workbook.add_worksheet();
    other.write_string(0, 1, "Ignorada").unwrap();
    other.write_string(1, 1, "Hotel Fantasma").unwrap();

    workbook.save(&path).unwrap();
    path
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORTER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_import_first_sheet_rows() {
    let dir = TempDir::new().unwrap();
    let path = create_export(&dir, "reservas.xlsx");

    let rows = ExcelImporter::new(&path).import().unwrap();

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].get("B"), Some(&CellValue::from("Hotel Sol")));
    assert_eq!(rows[0].get("U"), Some(&CellValue::from("Confirmada")));
    assert_eq!(rows[0].get("Z"), Some(&CellValue::Number(46054.5)));
    assert_eq!(rows[0].get("A"), Some(&CellValue::Number(1.0)));
    assert!(rows[3].get("B").is_none());
}

#[test]
fn test_import_without_header_skip() {
    let dir = TempDir::new().unwrap();
    let path = create_export(&dir, "reservas.xlsx");

    let rows = ExcelImporter::new(&path)
        .with_header_rows(0)
        .import()
        .unwrap();

    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].get("B"), Some(&CellValue::from("Instancia")));
}

#[test]
fn test_import_range_not_starting_at_a() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("offset.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 1, "Instancia").unwrap();
    sheet.write_string(0, 2, "Estado").unwrap();
    sheet.write_string(1, 1, "Norte").unwrap();
    sheet.write_string(1, 2, "Confirmada").unwrap();
    workbook.save(&path).unwrap();

    let rows = ExcelImporter::new(&path).import().unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("B"), Some(&CellValue::from("Norte")));
    assert_eq!(rows[0].get("C"), Some(&CellValue::from("Confirmada")));
}

#[test]
fn test_import_header_only_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vacio.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 1, "Instancia").unwrap();
    workbook.save(&path).unwrap();

    let rows = ExcelImporter::new(&path).import().unwrap();
    assert!(rows.is_empty());

    let mut session = ReportSession::new(ReportConfig::default());
    assert!(matches!(
        session.on_file_loaded("vacio.xlsx", rows),
        Err(ReservasError::EmptyInput)
    ));
}

#[test]
fn test_import_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reservas.csv");
    std::fs::write(&path, "B,U,Z\n").unwrap();

    let result = ExcelImporter::new(&path).import();

    assert!(matches!(result, Err(ReservasError::UnsupportedFile(_))));
}

#[test]
fn test_import_missing_file() {
    let result = ExcelImporter::new("/nonexistent/reservas.xlsx").import();
    assert!(matches!(result, Err(ReservasError::Import(_))));
}

#[test]
fn test_import_corrupt_workbook() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roto.xlsx");
    std::fs::write(&path, b"not a zip archive").unwrap();

    let result = ExcelImporter::new(&path).import();
    assert!(matches!(result, Err(ReservasError::Import(_))));
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORT → SESSION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_imported_rows_aggregate() {
    let dir = TempDir::new().unwrap();
    let path = create_export(&dir, "reservas.xlsx");
    let rows = ExcelImporter::new(&path).import().unwrap();
    let mut session = ReportSession::new(ReportConfig::default());

    let view = session.on_file_loaded("reservas.xlsx", rows).unwrap();

    assert_eq!(view.totals.reservations, 5);
    assert_eq!(view.totals.confirmed, 2);
    assert_eq!(view.instance("Hotel Sol").unwrap().stats.pending, 1);
    assert_eq!(view.instance("Hotel Mar").unwrap().stats.confirmed, 1);
    assert_eq!(view.instance("Sin Instancia").unwrap().stats.failed, 1);
    assert!(view.instance("Hotel Fantasma").is_none());
}

#[test]
fn test_imported_serial_dates_filter() {
    let dir = TempDir::new().unwrap();
    let path = create_export(&dir, "reservas.xlsx");
    let rows = ExcelImporter::new(&path).import().unwrap();
    let mut session = ReportSession::new(ReportConfig::default());
    session.on_file_loaded("reservas.xlsx", rows).unwrap();

    let view = session
        .on_filter_applied(date(2026, 2, 1), date(2026, 2, 28))
        .unwrap();

    assert_eq!(view.totals.reservations, 3);
    assert!(view.instance("Hotel Mar").is_none());
    assert!(view.instance("Hotel Luna").is_none());
}

// ═══════════════════════════════════════════════════════════════════════════
// EXPORT
// ═══════════════════════════════════════════════════════════════════════════

fn loaded_session(dir: &TempDir) -> ReportSession {
    let path = create_export(dir, "reservas.xlsx");
    let rows = ExcelImporter::new(&path).import().unwrap();
    let mut session = ReportSession::new(ReportConfig::default());
    session.on_file_loaded("reservas.xlsx", rows).unwrap();
    session.on_quote_changed("Hotel Sol", "8");
    session.on_global_quotes_changed("20");
    session
}

#[test]
fn test_export_report_workbook() {
    let dir = TempDir::new().unwrap();
    let session = loaded_session(&dir);
    let output = dir.path().join("informe.xlsx");

    ExcelExporter::new(&session.view()).export(&output).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&output).unwrap();
    let top = workbook.worksheet_range("Top Instances").unwrap();
    assert_eq!(top.get((1, 1)), Some(&Data::String("Hotel Sol".to_string())));
    assert_eq!(top.get((1, 2)), Some(&Data::Float(2.0)));

    let instances = workbook.worksheet_range("Instances").unwrap();
    assert_eq!(instances.get((1, 7)), Some(&Data::Float(8.0)));
    assert_eq!(instances.get((1, 8)), Some(&Data::Float(0.25)));
}

#[test]
fn test_filtered_export_records_filter() {
    let dir = TempDir::new().unwrap();
    let mut session = loaded_session(&dir);
    session
        .on_filter_applied(date(2026, 2, 1), date(2026, 2, 28))
        .unwrap();
    let output = dir.path().join("febrero.xlsx");

    let format = write_report(&output, &session.view()).unwrap();

    assert_eq!(format, ReportFormat::Xlsx);
    let mut workbook: Xlsx<_> = open_workbook(&output).unwrap();
    let summary = workbook.worksheet_range("Summary").unwrap();
    let has_filter_line = summary.rows().any(|row| {
        row.iter().any(|cell| {
            matches!(cell, Data::String(s) if s == "Showing 3 reservations from 2026-02-01 to 2026-02-28")
        })
    });
    assert!(has_filter_line);
}

#[test]
fn test_export_yaml_round_trips_totals() {
    let dir = TempDir::new().unwrap();
    let session = loaded_session(&dir);
    let output = dir.path().join("informe.yml");

    let format = write_report(&output, &session.view()).unwrap();

    assert_eq!(format, ReportFormat::Yaml);
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(yaml["totals"]["reservations"].as_u64(), Some(5));
    assert_eq!(yaml["global"]["quotes"].as_u64(), Some(20));
    assert_eq!(yaml["global"]["rate"].as_f64(), Some(10.0));
}

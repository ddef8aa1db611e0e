//! Excel exporter implementation - report view → .xlsx

use crate::error::{ReservasError, ReservasResult};
use crate::report::ReportView;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

const INSTANCE_HEADERS: [&str; 10] = [
    "Instance",
    "Confirmed",
    "Pending",
    "Failed",
    "Processing",
    "Unrecognized",
    "Total",
    "Quotes",
    "Total / Quotes",
    "Confirmed / Quotes",
];

/// Writes a report as three worksheets: Summary, Top Instances, Instances.
pub struct ExcelExporter<'a> {
    view: &'a ReportView,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(view: &'a ReportView) -> Self {
        Self { view }
    }

    /// Export the report to an Excel .xlsx file
    pub fn export(&self, output_path: &Path) -> ReservasResult<()> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();
        let percent = Format::new().set_num_format("0.00%");

        self.write_summary(workbook.add_worksheet(), &header, &percent)
            .map_err(export_error)?;
        self.write_top(workbook.add_worksheet(), &header)
            .map_err(export_error)?;
        self.write_instances(workbook.add_worksheet(), &header, &percent)
            .map_err(export_error)?;

        workbook
            .save(output_path)
            .map_err(|e| ReservasError::Export(format!("Failed to save Excel file: {}", e)))?;
        Ok(())
    }

    fn write_summary(
        &self,
        sheet: &mut Worksheet,
        header: &Format,
        percent: &Format,
    ) -> Result<(), XlsxError> {
        let view = self.view;
        sheet.set_name("Summary")?;
        sheet.set_column_width(0, 24)?;
        sheet.set_column_width(1, 40)?;

        sheet.write_string_with_format(0, 0, "Metric", header)?;
        sheet.write_string_with_format(0, 1, "Value", header)?;

        let mut row = 1;
        if let Some(source) = &view.source {
            sheet.write_string(row, 0, "Source")?;
            sheet.write_string(row, 1, source)?;
            row += 1;
        }
        if let Some(summary) = view.filter.summary() {
            sheet.write_string(row, 0, "Date filter")?;
            sheet.write_string(row, 1, summary)?;
            row += 1;
        }

        let counts = [
            ("Total reservations", view.totals.reservations),
            ("Confirmed", view.totals.confirmed),
            ("Pending", view.totals.pending),
            ("Failed", view.totals.failed),
            ("Processing", view.totals.processing),
            ("Unrecognized status", view.totals.unrecognized),
            ("Instances", view.totals.instances as u64),
            ("Global quotes", view.global.quotes),
        ];
        for (label, value) in counts {
            sheet.write_string(row, 0, label)?;
            sheet.write_number(row, 1, value as f64)?;
            row += 1;
        }

        sheet.write_string(row, 0, "Global conversion")?;
        sheet.write_number_with_format(row, 1, view.global.rate.as_f64() / 100.0, percent)?;
        Ok(())
    }

    fn write_top(&self, sheet: &mut Worksheet, header: &Format) -> Result<(), XlsxError> {
        sheet.set_name("Top Instances")?;
        sheet.set_column_width(1, 30)?;

        for (col, title) in ["Rank", "Instance", "Total"].iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, header)?;
        }
        for (i, entry) in self.view.top.iter().enumerate() {
            let row = (i + 1) as u32;
            sheet.write_number(row, 0, entry.rank as f64)?;
            sheet.write_string(row, 1, &entry.name)?;
            sheet.write_number(row, 2, entry.total as f64)?;
        }
        Ok(())
    }

    fn write_instances(
        &self,
        sheet: &mut Worksheet,
        header: &Format,
        percent: &Format,
    ) -> Result<(), XlsxError> {
        sheet.set_name("Instances")?;
        sheet.set_column_width(0, 30)?;

        for (col, title) in INSTANCE_HEADERS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, header)?;
        }

        for (i, report) in self.view.instances.iter().enumerate() {
            let row = (i + 1) as u32;
            let stats = &report.stats;
            sheet.write_string(row, 0, &stats.name)?;
            let counts = [
                stats.confirmed,
                stats.pending,
                stats.failed,
                stats.processing,
                stats.unrecognized,
                stats.total,
                report.conversion.quotes,
            ];
            for (offset, value) in counts.iter().enumerate() {
                sheet.write_number(row, (offset + 1) as u16, *value as f64)?;
            }
            sheet.write_number_with_format(
                row,
                8,
                report.conversion.total_rate.as_f64() / 100.0,
                percent,
            )?;
            sheet.write_number_with_format(
                row,
                9,
                report.conversion.confirmed_rate.as_f64() / 100.0,
                percent,
            )?;
        }
        Ok(())
    }
}

fn export_error(e: XlsxError) -> ReservasError {
    ReservasError::Export(format!("Failed to write worksheet: {}", e))
}

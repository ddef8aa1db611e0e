use crate::error::{ReservasError, ReservasResult};
use crate::excel::ExcelExporter;
use crate::report::ReportView;
use std::fs;
use std::path::Path;

/// Output formats, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Yaml,
    Json,
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> ReservasResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "xlsx" => Ok(ReportFormat::Xlsx),
            "yaml" | "yml" => Ok(ReportFormat::Yaml),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ReservasError::Export(format!(
                "Unsupported output format: '{}'. Use .xlsx, .yaml or .json",
                extension
            ))),
        }
    }
}

/// Write the report to `path` in the format matching its extension.
pub fn write_report(path: &Path, view: &ReportView) -> ReservasResult<ReportFormat> {
    let format = ReportFormat::from_path(path)?;
    match format {
        ReportFormat::Xlsx => ExcelExporter::new(view).export(path)?,
        ReportFormat::Yaml => {
            let content = serde_yaml::to_string(view)?;
            fs::write(path, content)?;
        }
        ReportFormat::Json => {
            let content = serde_json::to_string_pretty(view)?;
            fs::write(path, content)?;
        }
    }
    tracing::info!(path = %path.display(), ?format, "report written");
    Ok(format)
}

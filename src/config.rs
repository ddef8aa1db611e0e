//! Report configuration
//!
//! Which spreadsheet columns carry the instance, status and creation date,
//! plus a few presentation knobs. Every field has a default so an empty (or
//! missing) config file yields the layout of the reservations export:
//!
//! ```yaml
//! columns:
//!   instance: B
//!   status: U
//!   created_at: Z
//! fallback_instance: Sin Instancia
//! header_rows: 1
//! top_n: 5
//! ```

use crate::error::{ReservasError, ReservasResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Label used when a row has no instance identifier.
pub const DEFAULT_FALLBACK_INSTANCE: &str = "Sin Instancia";

/// Spreadsheet column letters read by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub instance: String,
    pub status: String,
    pub created_at: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            instance: "B".to_string(),
            status: "U".to_string(),
            created_at: "Z".to_string(),
        }
    }
}

impl ColumnMapping {
    fn validate(&self) -> ReservasResult<()> {
        for (field, letters) in [
            ("instance", &self.instance),
            ("status", &self.status),
            ("created_at", &self.created_at),
        ] {
            if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(ReservasError::Config(format!(
                    "columns.{} must be a column letter like 'B' or 'AA', got '{}'",
                    field, letters
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub columns: ColumnMapping,
    pub fallback_instance: String,
    /// Rows skipped at the top of the sheet
    pub header_rows: usize,
    /// Size of the top ranking
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            columns: ColumnMapping::default(),
            fallback_instance: DEFAULT_FALLBACK_INSTANCE.to_string(),
            header_rows: 1,
            top_n: 5,
        }
    }
}

impl ReportConfig {
    /// Read a YAML config file and validate it.
    pub fn load(path: &Path) -> ReservasResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "loaded report config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> ReservasResult<Self> {
        // An empty document deserializes to unit, not to the defaults
        let config: ReportConfig = if content.trim().is_empty() {
            ReportConfig::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ReservasResult<()> {
        self.columns.validate()?;
        if self.top_n == 0 {
            return Err(ReservasError::Config("top_n must be at least 1".to_string()));
        }
        Ok(())
    }
}

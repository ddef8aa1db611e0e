//! Reservas - reservation spreadsheet reports
//!
//! Groups reservation rows by instance, counts them by status, filters them
//! by creation date and turns the counts into conversion rates against
//! user-entered quote numbers.
//!
//! # Features
//!
//! - Status classification (Confirmada, Pendiente, Fallida, Procesando)
//! - Inclusive date range filtering over Excel serial or text dates
//! - Per-instance and global conversion rates
//! - Excel import, and report export to .xlsx, .yaml or .json
//!
//! # Example
//!
//! ```no_run
//! use royalbit_reservas::config::ReportConfig;
//! use royalbit_reservas::core::ReportSession;
//! use royalbit_reservas::excel::ExcelImporter;
//!
//! let rows = ExcelImporter::new("reservas.xlsx").import()?;
//!
//! let mut session = ReportSession::new(ReportConfig::default());
//! session.on_file_loaded("reservas.xlsx", rows)?;
//! session.on_global_quotes_changed("250");
//! let report = session.view();
//!
//! println!("Instances: {}", report.totals.instances);
//! println!("Global conversion: {}%", report.global.rate);
//! # Ok::<(), royalbit_reservas::error::ReservasError>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod report;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use config::{ColumnMapping, ReportConfig};
pub use core::ReportSession;
pub use error::{ReservasError, ReservasResult};
pub use report::ReportView;
pub use types::{AggregationResult, CellValue, InstanceStats, QuoteBook, RawRow, Snapshot};

//! CLI command handlers

pub mod commands;

pub use commands::{build_report, print_report, report, show_config, watch, ReportOptions};

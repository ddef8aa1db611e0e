use clap::{Parser, Subcommand};
use royalbit_reservas::cli::{self, ReportOptions};
use royalbit_reservas::error::ReservasResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reservas")]
#[command(about = "Reservation reports: status counts per instance, date filters and quote conversion.")]
#[command(long_about = "Reservas - Reservation spreadsheet reports

Reads the first sheet of a reservation export (.xlsx, .xlsm, .xls, .ods),
groups rows by instance and counts statuses (Confirmada, Pendiente,
Fallida, Procesando). Quote counts turn the counts into conversion rates.

COMMANDS:
  report  - Print (and optionally export) the report for a file
  watch   - Re-run the report whenever the file changes
  config  - Show the effective configuration

COLUMNS (override with --config or flags):
  B  instance    U  status    Z  creation date

EXAMPLES:
  reservas report reservas.xlsx
  reservas report reservas.xlsx --from 2026-02-01 --to 2026-02-28
  reservas report reservas.xlsx -q 250 -i \"Hotel Sol=120\" -o report.xlsx
  reservas watch reservas.xlsx --top 10")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reservation report for a spreadsheet
    Report {
        /// Path to the reservation spreadsheet
        file: PathBuf,

        #[command(flatten)]
        options: ReportOptions,
    },

    #[command(long_about = "Watch a reservation spreadsheet and rebuild the report on change.

Saves from Excel or LibreOffice produce several file events; they are
debounced (200ms) into a single run. Errors are printed and watching
continues. Press Ctrl+C to stop.")]
    /// Re-run the report whenever the file changes
    Watch {
        /// Path to the reservation spreadsheet
        file: PathBuf,

        #[command(flatten)]
        options: ReportOptions,
    },

    /// Show the effective configuration (defaults, file, then flags)
    Config {
        #[command(flatten)]
        options: ReportOptions,
    },
}

fn main() -> ReservasResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "royalbit_reservas=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { file, options } => cli::report(file, options),
        Commands::Watch { file, options } => cli::watch(file, options),
        Commands::Config { options } => cli::show_config(options),
    }
}

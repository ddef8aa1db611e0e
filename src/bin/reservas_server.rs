//! Reservas API Server binary
//!
//! HTTP REST API over a reservation report session.

use std::path::PathBuf;

use clap::Parser;
use royalbit_reservas::api::{run_api_server, ApiConfig};
use royalbit_reservas::config::ReportConfig;

#[derive(Parser, Debug)]
#[command(name = "reservas-server")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "Reservas API Server - HTTP REST API for reservation reports")]
#[command(long_about = r#"
Reservas API Server - HTTP REST API

Holds one report session and exposes its commands:
  - POST   /api/v1/load    - Load a spreadsheet (file_path) or inline rows
  - GET    /api/v1/report  - Current report
  - POST   /api/v1/filter  - Apply a date range {start, end}
  - DELETE /api/v1/filter  - Clear the date filter
  - POST   /api/v1/quotes  - Set quotes {instance?, value}
  - POST   /api/v1/export  - Write the report {output_path}

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Example usage:
  reservas-server                           # Start on localhost:8080
  reservas-server --host 0.0.0.0 --port 3000

  curl -X POST http://localhost:8080/api/v1/load \
    -H "Content-Type: application/json" \
    -d '{"file_path": "reservas.xlsx"}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "RESERVAS_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "RESERVAS_PORT")]
    port: u16,

    /// YAML report config (column mapping, fallback label, header rows, top N)
    #[arg(short, long, env = "RESERVAS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let report = match &args.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        report,
    };

    run_api_server(config).await
}

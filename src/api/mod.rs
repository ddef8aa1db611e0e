//! Reservas API Server module
//!
//! HTTP REST API over a report session. Run with `reservas-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server, ApiConfig, AppState};

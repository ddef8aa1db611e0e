//! Reservas API Server implementation
//!
//! HTTP REST API over a single shared report session.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::handlers;
use crate::config::ReportConfig;
use crate::core::ReportSession;

/// API Server configuration
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub report: ReportConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            report: ReportConfig::default(),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub version: String,
    pub session: Mutex<ReportSession>,
}

impl AppState {
    pub fn new(config: ReportConfig) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            session: Mutex::new(ReportSession::new(config)),
        }
    }
}

/// Build the router with all endpoints and middleware
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/version", get(handlers::version))
        .route("/api/v1/load", post(handlers::load))
        .route("/api/v1/report", get(handlers::report))
        .route(
            "/api/v1/filter",
            post(handlers::apply_filter).delete(handlers::clear_filter),
        )
        .route("/api/v1/quotes", post(handlers::quotes))
        .route("/api/v1/export", post(handlers::export))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Run the API server
pub async fn run_api_server(config: ApiConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reservas_server=info,royalbit_reservas=info,tower_http=info".into()),
        )
        .init();

    config.report.validate()?;
    let app = router(Arc::new(AppState::new(config.report)));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("📊 Reservas API Server starting on http://{}", addr);
    info!("   Endpoints: /api/v1/load, /api/v1/report, /api/v1/filter, /api/v1/quotes, /api/v1/export");
    info!("   Health: /health, Version: /version");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Reservas API Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping server...");
}

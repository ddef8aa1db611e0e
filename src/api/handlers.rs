//! API request handlers
//!
//! Every session endpoint answers with the current `ReportView`. Engine
//! errors leave the session untouched and come back as `success: false`.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::core::dates::parse_filter_input;
use crate::error::ReservasError;
use crate::excel::ExcelImporter;
use crate::report::ReportView;
use crate::types::RawRow;
use crate::writer::write_report;

use super::server::AppState;

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of a handler result
pub struct ApiError(ReservasError);

impl From<ReservasError> for ApiError {
    fn from(error: ReservasError) -> Self {
        Self(error)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ReservasError::Io(_)
            | ReservasError::Export(_)
            | ReservasError::Yaml(_)
            | ReservasError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self.0, "request rejected");
        (status, Json(ApiResponse::<()>::err(self.0.to_string()))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ReservasError::Validation(rejection.body_text()))
    }
}

pub type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// JSON body extractor whose rejections use the `ApiResponse` envelope
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(method: &str, path: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Reservas API Server".to_string(),
        version: state.version.clone(),
        description: "Reservation aggregation and conversion reports".to_string(),
        endpoints: vec![
            EndpointInfo::new("GET", "/health", "Health check endpoint"),
            EndpointInfo::new("GET", "/version", "Get server version"),
            EndpointInfo::new("POST", "/api/v1/load", "Load reservations from a file or inline rows"),
            EndpointInfo::new("GET", "/api/v1/report", "Current report"),
            EndpointInfo::new("POST", "/api/v1/filter", "Apply a date range filter"),
            EndpointInfo::new("DELETE", "/api/v1/filter", "Clear the date filter"),
            EndpointInfo::new("POST", "/api/v1/quotes", "Set instance or global quotes"),
            EndpointInfo::new("POST", "/api/v1/export", "Write the report to .xlsx, .yaml or .json"),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub loaded: bool,
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let loaded = state.session.lock().await.is_loaded();
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        loaded,
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: ["load", "report", "filter", "quotes", "export"]
            .iter()
            .map(|f| f.to_string())
            .collect(),
    }))
}

/// Load request: a spreadsheet path on the server, or rows keyed by column letter
#[derive(Deserialize)]
pub struct LoadRequest {
    pub file_path: Option<String>,
    pub rows: Option<Vec<RawRow>>,
    pub source: Option<String>,
}

/// POST /api/v1/load - Replace the loaded reservations
pub async fn load(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<LoadRequest>,
) -> ApiResult<ReportView> {
    let mut session = state.session.lock().await;

    let (source, rows) = match (req.file_path, req.rows) {
        (Some(file_path), _) => {
            let path = PathBuf::from(&file_path);
            let rows = ExcelImporter::new(&path)
                .with_header_rows(session.config().header_rows)
                .import()?;
            let source = req.source.unwrap_or_else(|| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or(file_path)
            });
            (source, rows)
        }
        (None, Some(rows)) => (req.source.unwrap_or_else(|| "inline".to_string()), rows),
        (None, None) => {
            return Err(ReservasError::Validation(
                "Either 'file_path' or 'rows' is required".to_string(),
            )
            .into())
        }
    };

    let view = session.on_file_loaded(source, rows)?;
    Ok(Json(ApiResponse::ok(view)))
}

/// GET /api/v1/report - Current report
pub async fn report(State(state): State<Arc<AppState>>) -> ApiResult<ReportView> {
    let session = state.session.lock().await;
    if !session.is_loaded() {
        return Err(ReservasError::EmptyInput.into());
    }
    Ok(Json(ApiResponse::ok(session.view())))
}

/// Filter request. Dates are `YYYY-MM-DD`; blank dates count as missing.
#[derive(Deserialize)]
pub struct FilterRequest {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// POST /api/v1/filter - Apply a date range
pub async fn apply_filter(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<FilterRequest>,
) -> ApiResult<ReportView> {
    let start = parse_filter_input(req.start.as_deref())?;
    let end = parse_filter_input(req.end.as_deref())?;

    let view = state.session.lock().await.on_filter_applied(start, end)?;
    Ok(Json(ApiResponse::ok(view)))
}

/// DELETE /api/v1/filter - Back to the full data set
pub async fn clear_filter(State(state): State<Arc<AppState>>) -> ApiResult<ReportView> {
    let view = state.session.lock().await.on_filter_cleared();
    Ok(Json(ApiResponse::ok(view)))
}

/// Quote request. Without `instance` the value is the global quote count.
#[derive(Deserialize)]
pub struct QuotesRequest {
    pub instance: Option<String>,
    pub value: String,
}

/// POST /api/v1/quotes - Set a quote count
pub async fn quotes(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<QuotesRequest>,
) -> ApiResult<ReportView> {
    let mut session = state.session.lock().await;
    let view = match &req.instance {
        Some(instance) => session.on_quote_changed(instance, &req.value),
        None => session.on_global_quotes_changed(&req.value),
    };
    Ok(Json(ApiResponse::ok(view)))
}

/// Export request
#[derive(Deserialize)]
pub struct ExportRequest {
    pub output_path: String,
}

/// Export response
#[derive(Serialize)]
pub struct ExportResponse {
    pub output_path: String,
    pub format: String,
}

/// POST /api/v1/export - Write the current report to disk
pub async fn export(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<ExportRequest>,
) -> ApiResult<ExportResponse> {
    let view = {
        let session = state.session.lock().await;
        if !session.is_loaded() {
            return Err(ReservasError::EmptyInput.into());
        }
        session.view()
    };

    let format = write_report(&PathBuf::from(&req.output_path), &view)?;
    Ok(Json(ApiResponse::ok(ExportResponse {
        output_path: req.output_path,
        format: format!("{:?}", format).to_lowercase(),
    })))
}

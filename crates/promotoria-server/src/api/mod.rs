mod admin;
mod campaigns;
mod summary;
mod themes;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use promotoria_core::{AppConfig, CampaignSettings};
use promotoria_sheets::SheetError;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub settings: Arc<CampaignSettings>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    data_root: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    pub fn not_found(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(request_id, "not_found", message)
    }

    pub fn bad_request(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(request_id, "bad_request", message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_sheet_error(request_id: String, error: &SheetError) -> ApiError {
    tracing::error!(error = %error, "spreadsheet read failed");
    ApiError::new(request_id, "internal_error", "could not read spreadsheet data")
}

/// Runs filesystem and workbook parsing off the async workers.
pub(super) async fn run_blocking<T, F>(request_id: &str, work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await.map_err(|error| {
        tracing::error!(error = %error, "blocking task failed");
        ApiError::new(request_id, "internal_error", "request processing failed")
    })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/campaigns", get(campaigns::list_campaigns))
        .route("/api/campaigns/dates", get(campaigns::campaign_dates))
        .route("/api/advisors", get(campaigns::list_advisors))
        .route(
            "/api/campaign/{name}/data/{advisor}",
            get(campaigns::advisor_record),
        )
        .route(
            "/api/campaign/{name}/progress/{advisor}",
            get(campaigns::advisor_progress),
        )
        .route("/api/admin/summary", get(admin::admin_summary))
        .route("/api/admin/classification", get(admin::admin_classification))
        .route("/api/resumen-general", get(summary::resumen_general))
        .route("/api/themes", get(themes::list_themes))
        .route(
            "/api/active-theme",
            get(themes::active_theme).post(themes::set_active_theme),
        )
        .fallback(unknown_endpoint)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(build_cors()),
        )
        .with_state(state)
}

async fn unknown_endpoint(Extension(req_id): Extension<RequestId>) -> ApiError {
    ApiError::not_found(req_id.0, "API endpoint not found")
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);
    let data_root = state.config.data_root.clone();
    let readable = tokio::task::spawn_blocking(move || data_root.is_dir())
        .await
        .unwrap_or(false);

    if readable {
        (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    data_root: "ok",
                },
                meta,
            }),
        )
    } else {
        tracing::warn!(
            data_root = %state.config.data_root.display(),
            "health check: data root unavailable"
        );
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse {
                data: HealthData {
                    status: "degraded",
                    data_root: "unavailable",
                },
                meta,
            }),
        )
    }
}

#[cfg(test)]
mod fixtures;

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;

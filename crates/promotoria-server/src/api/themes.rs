use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::RequestId;
use crate::themes::{self, ThemeError};

use super::{run_blocking, ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SetThemeRequest {
    pub theme_file: String,
}

#[derive(Debug, Serialize)]
pub(super) struct SetThemeResponse {
    success: bool,
}

fn map_theme_error(request_id: String, error: &ThemeError) -> ApiError {
    match error {
        ThemeError::NotFound(_) => ApiError::not_found(request_id, "Theme not found"),
        ThemeError::InvalidName(_) => ApiError::bad_request(request_id, error.to_string()),
        ThemeError::Io { .. } | ThemeError::Malformed { .. } => {
            tracing::error!(error = %error, "theme store failed");
            ApiError::new(request_id, "internal_error", "could not access themes")
        }
    }
}

pub(super) async fn list_themes(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let dir = state.config.themes_path.clone();
    let listed = run_blocking(&req_id.0, move || themes::list_themes(&dir))
        .await?
        .map_err(|e| map_theme_error(req_id.0.clone(), &e))?;
    Ok(Json(listed))
}

pub(super) async fn active_theme(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Value>, ApiError> {
    let dir = state.config.themes_path.clone();
    let theme = run_blocking(&req_id.0, move || themes::active_theme(&dir))
        .await?
        .map_err(|e| map_theme_error(req_id.0.clone(), &e))?;
    Ok(Json(theme))
}

pub(super) async fn set_active_theme(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SetThemeRequest>, JsonRejection>,
) -> Result<Json<SetThemeResponse>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::bad_request(req_id.0.clone(), e.body_text()))?;

    let dir = state.config.themes_path.clone();
    run_blocking(&req_id.0, move || {
        themes::set_active_theme(&dir, &request.theme_file)
    })
    .await?
    .map_err(|e| map_theme_error(req_id.0.clone(), &e))?;
    Ok(Json(SetThemeResponse { success: true }))
}

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use promotoria_core::{parse_branch_list, SummaryWorkbook};
use promotoria_sheets::load_summary_workbook;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_sheet_error, run_blocking, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SummaryQuery {
    /// Comma-separated branch codes, e.g. `2692,2856`.
    pub sucursal: Option<String>,
}

pub(super) async fn resumen_general(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryWorkbook>, ApiError> {
    let filter = parse_branch_list(query.sucursal.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::bad_request(req_id.0.clone(), e.to_string()))?;

    let AppState { config, settings } = state;
    let workbook_name = settings.summary_workbook.clone();
    let workbook = run_blocking(&req_id.0, move || {
        load_summary_workbook(&config.data_root, &settings)
    })
    .await?
    .map_err(|e| map_sheet_error(req_id.0.clone(), &e))?
    .ok_or_else(|| ApiError::not_found(req_id.0.clone(), format!("{workbook_name} not found")))?;

    if filter.is_empty() {
        return Ok(Json(workbook));
    }
    Ok(Json(workbook.filter_by_branch(&filter)))
}

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Datelike;
use promotoria_core::date::format_cut_off;
use promotoria_core::{classify, progress, AdvisorClassification, Campaign, CampaignProgress, Row};
use promotoria_sheets::{list_campaign_folders, load_campaign, load_fixed_campaigns};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_sheet_error, run_blocking, ApiError, AppState};

#[derive(Debug, Serialize)]
pub(super) struct AdvisorProgressResponse {
    classification: AdvisorClassification,
    progress: CampaignProgress,
}

pub(super) async fn list_campaigns(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<String>>, ApiError> {
    let AppState { config, settings } = state;
    let folders = run_blocking(&req_id.0, move || {
        list_campaign_folders(&config.data_root, &settings)
    })
    .await?
    .map_err(|e| map_sheet_error(req_id.0.clone(), &e))?;
    Ok(Json(folders))
}

pub(super) async fn list_advisors(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<String>>, ApiError> {
    let AppState { config, settings } = state;
    let advisors = run_blocking(&req_id.0, move || {
        promotoria_sheets::list_advisors(&config.data_root, &settings)
    })
    .await?
    .map_err(|e| map_sheet_error(req_id.0.clone(), &e))?;
    tracing::debug!(count = advisors.len(), "listed advisors");
    Ok(Json(advisors))
}

/// The advisor's row in a campaign folder, looked up by exact name.
async fn find_record(
    state: AppState,
    req_id: &str,
    folder: String,
    advisor: &str,
) -> Result<Row, ApiError> {
    let root = state.config.data_root.clone();
    let snapshot = run_blocking(req_id, move || load_campaign(&root, &folder))
        .await?
        .ok_or_else(|| ApiError::not_found(req_id, "Campaign not found"))?;
    snapshot
        .find_advisor(advisor)
        .cloned()
        .ok_or_else(|| ApiError::not_found(req_id, "Advisor not found in this campaign"))
}

pub(super) async fn advisor_record(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((name, advisor)): Path<(String, String)>,
) -> Result<Json<Row>, ApiError> {
    let record = find_record(state, &req_id.0, name, &advisor).await?;
    Ok(Json(record))
}

pub(super) async fn advisor_progress(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path((name, advisor)): Path<(String, String)>,
) -> Result<Json<AdvisorProgressResponse>, ApiError> {
    let Some(campaign) = Campaign::from_folder(&name) else {
        return Err(ApiError::not_found(
            req_id.0,
            format!("no goal rules for campaign '{name}'"),
        ));
    };

    let record = find_record(state, &req_id.0, name, &advisor).await?;
    let current_month = chrono::Local::now().month();
    Ok(Json(AdvisorProgressResponse {
        classification: classify(campaign, &record),
        progress: progress(campaign, &record, current_month),
    }))
}

pub(super) async fn campaign_dates(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<BTreeMap<String, String>>, ApiError> {
    let AppState { config, settings } = state;
    let loaded = run_blocking(&req_id.0, move || {
        load_fixed_campaigns(&config.data_root, &settings)
    })
    .await?;

    let dates = loaded
        .into_iter()
        .map(|(folder, snapshot)| {
            let date = snapshot
                .as_ref()
                .and_then(|s| s.cut_off())
                .map(format_cut_off)
                .unwrap_or_default();
            (folder, date)
        })
        .collect();
    Ok(Json(dates))
}

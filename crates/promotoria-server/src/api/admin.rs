use std::collections::BTreeMap;

use axum::{extract::State, Extension, Json};
use promotoria_core::{
    classify_campaign, distinct_advisor_count, top_mdrt, Campaign, CampaignSnapshot,
    ClassificationBoard, Row, TierCounts, TopProducer,
};
use promotoria_sheets::load_fixed_campaigns;
use serde::Serialize;

use crate::middleware::RequestId;

use super::{run_blocking, ApiError, AppState};

const TOP_PRODUCERS: usize = 5;

#[derive(Debug, Serialize)]
pub(super) struct CampaignBoard {
    counts: TierCounts,
    #[serde(flatten)]
    board: ClassificationBoard,
}

#[derive(Debug, Serialize)]
pub(super) struct ClassificationOverview {
    #[serde(flatten)]
    campaigns: BTreeMap<String, CampaignBoard>,
    total_advisors: usize,
    top_mdrt: Vec<TopProducer>,
}

pub(super) async fn admin_summary(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<BTreeMap<String, Vec<Row>>>, ApiError> {
    let AppState { config, settings } = state;
    let loaded = run_blocking(&req_id.0, move || {
        load_fixed_campaigns(&config.data_root, &settings)
    })
    .await?;

    let summary = loaded
        .into_iter()
        .map(|(folder, snapshot)| (folder, snapshot.map(|s| s.records).unwrap_or_default()))
        .collect();
    Ok(Json(summary))
}

pub(super) async fn admin_classification(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ClassificationOverview>, ApiError> {
    let AppState { config, settings } = state;
    let loaded = run_blocking(&req_id.0, move || {
        load_fixed_campaigns(&config.data_root, &settings)
    })
    .await?;
    Ok(Json(build_overview(&loaded)))
}

/// Tier boards for every configured campaign with goal rules. Folders without
/// data get empty boards.
fn build_overview(loaded: &[(String, Option<CampaignSnapshot>)]) -> ClassificationOverview {
    let mut campaigns = BTreeMap::new();
    let mut top = Vec::new();

    for (folder, snapshot) in loaded {
        let Some(campaign) = Campaign::from_folder(folder) else {
            tracing::debug!(folder = %folder, "no goal rules for folder; skipping board");
            continue;
        };
        let rows = snapshot.as_ref().map_or(&[][..], |s| s.records.as_slice());
        let board = classify_campaign(campaign, rows);
        if campaign == Campaign::Mdrt {
            top = top_mdrt(rows, TOP_PRODUCERS);
        }
        campaigns.insert(
            folder.clone(),
            CampaignBoard {
                counts: board.counts(),
                board,
            },
        );
    }

    ClassificationOverview {
        campaigns,
        total_advisors: distinct_advisor_count(loaded.iter().filter_map(|(_, s)| s.as_ref())),
        top_mdrt: top,
    }
}

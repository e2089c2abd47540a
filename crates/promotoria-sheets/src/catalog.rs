//! Campaign folder discovery under the data root.

use std::path::Path;

use promotoria_core::{advisor_directory, CampaignSettings, CampaignSnapshot};

use crate::error::SheetError;
use crate::loader::load_campaign;

/// Sub-directories of `root` that are campaign folders, sorted.
///
/// # Errors
///
/// Returns [`SheetError::Io`] if `root` cannot be listed.
pub fn list_campaign_folders(
    root: &Path,
    settings: &CampaignSettings,
) -> Result<Vec<String>, SheetError> {
    let io_err = |source| SheetError::Io {
        path: root.display().to_string(),
        source,
    };

    let mut folders = Vec::new();
    for entry in std::fs::read_dir(root).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if !entry.file_type().map_err(io_err)?.is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if !settings.is_excluded_dir(&name) {
            folders.push(name);
        }
    }
    folders.sort();
    Ok(folders)
}

/// Snapshots of every discovered campaign folder that has data.
///
/// # Errors
///
/// Returns [`SheetError::Io`] if `root` cannot be listed.
pub fn load_all_campaigns(
    root: &Path,
    settings: &CampaignSettings,
) -> Result<Vec<CampaignSnapshot>, SheetError> {
    let folders = list_campaign_folders(root, settings)?;
    tracing::debug!(folders = ?folders, "loading campaign folders");
    Ok(folders
        .iter()
        .filter_map(|folder| load_campaign(root, folder))
        .collect())
}

/// Distinct advisor names across all campaign folders, minus the excluded
/// names.
///
/// # Errors
///
/// Returns [`SheetError::Io`] if `root` cannot be listed.
pub fn list_advisors(root: &Path, settings: &CampaignSettings) -> Result<Vec<String>, SheetError> {
    let snapshots = load_all_campaigns(root, settings)?;
    Ok(advisor_directory(&snapshots, &settings.excluded_advisors))
}

/// Snapshots of the configured campaign list, in list order.
#[must_use]
pub fn load_fixed_campaigns(
    root: &Path,
    settings: &CampaignSettings,
) -> Vec<(String, Option<CampaignSnapshot>)> {
    settings
        .campaigns
        .iter()
        .map(|folder| (folder.clone(), load_campaign(root, folder)))
        .collect()
}

use std::collections::HashSet;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Data-root directories that are never campaign folders.
pub const DEFAULT_EXCLUDED_DIRS: [&str; 10] = [
    "assets",
    "themes",
    "server",
    "node_modules",
    "src",
    "public",
    ".git",
    "dist",
    ".conda",
    "administrador",
];

/// Names dropped from the advisor directory.
pub const DEFAULT_EXCLUDED_ADVISORS: [&str; 1] = ["ANA LAURA CONTRERAS IÑIGUEZ"];

/// The fixed campaign list used by the dates, summary and board endpoints.
pub const DEFAULT_CAMPAIGNS: [&str; 5] = [
    "mdrt",
    "camino_cumbre",
    "convenciones",
    "graduacion",
    "legion_centurion",
];

/// Summary workbook location, relative to the data root.
pub const DEFAULT_SUMMARY_WORKBOOK: &str = "administrador/resumen_general.xlsx";

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}

/// Sheet names inside the summary workbook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SummarySheets {
    pub pagado_pendiente: String,
    pub asesores_sin_emision: String,
    pub proactivos: String,
    pub comparativo_vida: String,
}

impl Default for SummarySheets {
    fn default() -> Self {
        Self {
            pagado_pendiente: "pagado_pendiente".to_owned(),
            asesores_sin_emision: "asesores_sin_emision".to_owned(),
            proactivos: "proactivos".to_owned(),
            comparativo_vida: "comparativo_vida".to_owned(),
        }
    }
}

/// Named sets and paths that shape folder discovery and reporting.
///
/// Every field is optional in YAML; omitted fields keep the built-in default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CampaignSettings {
    pub excluded_dirs: Vec<String>,
    pub excluded_advisors: Vec<String>,
    pub campaigns: Vec<String>,
    pub summary_workbook: String,
    pub summary_sheets: SummarySheets,
}

impl Default for CampaignSettings {
    fn default() -> Self {
        Self {
            excluded_dirs: owned(&DEFAULT_EXCLUDED_DIRS),
            excluded_advisors: owned(&DEFAULT_EXCLUDED_ADVISORS),
            campaigns: owned(&DEFAULT_CAMPAIGNS),
            summary_workbook: DEFAULT_SUMMARY_WORKBOOK.to_owned(),
            summary_sheets: SummarySheets::default(),
        }
    }
}

impl CampaignSettings {
    /// `true` for directories that are not campaign folders: the denylist and
    /// anything starting with a dot.
    #[must_use]
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded_dirs.iter().any(|d| d == name)
    }

    #[must_use]
    pub fn is_excluded_advisor(&self, name: &str) -> bool {
        self.excluded_advisors.iter().any(|a| a == name)
    }
}

/// Parse and validate settings from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_settings(yaml: &str) -> Result<CampaignSettings, ConfigError> {
    let settings: CampaignSettings = serde_yaml::from_str(yaml)?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Load and validate settings from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_settings(path: &Path) -> Result<CampaignSettings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SettingsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_settings(&content)
}

/// Settings from `path` when one is configured, the built-in defaults otherwise.
///
/// # Errors
///
/// Returns `ConfigError` if a configured file cannot be loaded.
pub fn resolve_settings(path: Option<&Path>) -> Result<CampaignSettings, ConfigError> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(CampaignSettings::default()),
    }
}

fn validate_settings(settings: &CampaignSettings) -> Result<(), ConfigError> {
    if settings.campaigns.is_empty() {
        return Err(ConfigError::Validation(
            "campaigns must list at least one folder".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for campaign in &settings.campaigns {
        if campaign.trim().is_empty() {
            return Err(ConfigError::Validation(
                "campaign folder names must be non-empty".to_string(),
            ));
        }
        if !seen.insert(campaign.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate campaign folder: '{campaign}'"
            )));
        }
    }

    let workbook = Path::new(&settings.summary_workbook);
    let is_relative = workbook
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if settings.summary_workbook.is_empty() || !is_relative {
        return Err(ConfigError::Validation(format!(
            "summary_workbook must be a relative path inside the data root, got '{}'",
            settings.summary_workbook
        )));
    }
    if !settings.summary_workbook.ends_with(".xlsx") {
        return Err(ConfigError::Validation(format!(
            "summary_workbook must be an .xlsx file, got '{}'",
            settings.summary_workbook
        )));
    }

    Ok(())
}

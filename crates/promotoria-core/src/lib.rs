pub mod app_config;
pub mod cell;
pub mod config;
pub mod date;
pub mod directory;
pub mod goals;
pub mod normalize;
pub mod record;
pub mod settings;
pub mod summary;

pub use app_config::{AppConfig, Environment};
pub use cell::CellValue;
pub use config::{load_app_config, load_app_config_from_env};
pub use directory::{advisor_directory, distinct_advisor_count};
pub use goals::{
    classify, classify_campaign, progress, top_mdrt, AdvisorClassification, Campaign,
    CampaignProgress, ClassificationBoard, Tier, TierCounts, TopProducer,
};
pub use normalize::{rows_from_grid, SheetGrid};
pub use record::{CampaignSnapshot, Row, ADVISOR_FIELD, CUT_OFF_FIELD};
pub use settings::{load_settings, resolve_settings, CampaignSettings, SummarySheets};
pub use summary::{
    build_summary_workbook, pagado_pendiente_totals, parse_branch_list, BranchFilter,
    PaymentTotals, SummaryGrids, SummaryWorkbook,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read settings file {path}: {source}")]
    SettingsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings file: {0}")]
    SettingsFileParse(#[from] serde_yaml::Error),

    #[error("invalid settings: {0}")]
    Validation(String),
}

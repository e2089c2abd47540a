use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory whose sub-folders are the campaign folders.
    pub data_root: PathBuf,
    /// Directory holding `*.json` theme files and the `active_theme.txt` pointer.
    pub themes_path: PathBuf,
    /// Optional YAML file overriding the built-in [`crate::CampaignSettings`].
    pub settings_path: Option<PathBuf>,
}

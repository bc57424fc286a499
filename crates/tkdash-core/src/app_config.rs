use std::path::PathBuf;

use chrono::NaiveDate;

use crate::dates::CenturyPolicy;

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
    pub log_level: String,
    /// Location of the Overview export: a filesystem path or an `http(s)` URL.
    pub overview_source: String,
    /// Location of the Content export: a filesystem path or an `http(s)` URL.
    pub content_source: String,
    pub tag_presets_path: PathBuf,
    pub century: CenturyPolicy,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub default_start: NaiveDate,
    pub default_end: NaiveDate,
    pub default_min_views: u64,
    pub default_max_views: u64,
}

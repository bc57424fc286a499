//! Data pipeline for the TikTok analytics dashboard.
//!
//! Turns raw CSV rows from the "Overview" and "Content" exports into typed
//! records, filters them by date and view-count range, and derives the
//! metrics, tag-combination buckets and box-plot statistics that the
//! rendering layer draws.

pub mod app_config;
pub mod config;
pub mod dates;
pub mod filter;
pub mod format;
pub mod metrics;
pub mod presets;
pub mod records;
pub mod state;
pub mod stats;
pub mod tags;
pub mod view;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use dates::{CenturyPolicy, DateNormalizer, DateParseError};
pub use filter::{filter_records, DateRange, Volume, VolumeRange};
pub use metrics::{derive_metrics, engagement_percent, DerivedMetrics};
pub use presets::{load_tag_combinations, load_tag_presets, TagPreset, TagPresetsFile};
pub use records::{ContentRecord, Dataset, OverviewRecord, RawRow, RecordError, RowError};
pub use state::{DashboardEvent, DashboardState, Metric, VisibleMetrics};
pub use stats::{box_plot_stats, BoxPlotStats, LabeledValue, Outlier};
pub use tags::{
    group_by_combinations, TagBucket, TagCombination, TagCombinations, TagScatterPoint,
    AVAILABLE_TAGS,
};
pub use view::{
    build_view, BoxPlotSeries, DashboardView, DurationViewsPoint, EngagementWatchPoint,
    SeriesInfo, TableRow, TrendPoint, TABLE_COLUMNS,
};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid metric key: {0}")]
    InvalidMetric(String),

    #[error(transparent)]
    InvalidDate(#[from] DateParseError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read tag presets file {path}: {source}")]
    PresetsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tag presets file: {0}")]
    PresetsFileParse(#[from] serde_yaml::Error),

    #[error("tag presets validation failed: {0}")]
    Validation(String),
}

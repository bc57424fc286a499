//! Translates filter flags into dashboard events.
//!
//! The flags are replayed through `DashboardState::apply` in the same order a
//! user would click through the dashboard, so the CLI and an interactive
//! surface share one update path.

use clap::Args;
use tkdash_core::tags::{normalize_tags, AVAILABLE_TAGS};
use tkdash_core::{DashboardEvent, DashboardState, DateNormalizer, DateRange, Metric, VolumeRange};

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Start of the date range (YYYY-MM-DD, DD/MM/YY or DD/MM/YYYY)
    #[arg(long, global = true)]
    pub from: Option<String>,

    /// End of the date range (inclusive)
    #[arg(long, global = true)]
    pub to: Option<String>,

    /// Minimum view count (inclusive)
    #[arg(long, global = true)]
    pub min_views: Option<u64>,

    /// Maximum view count (inclusive)
    #[arg(long, global = true)]
    pub max_views: Option<u64>,

    /// Hide a trend series, e.g. `likes` or `profile-views` (repeatable)
    #[arg(long, global = true)]
    pub hide: Vec<Metric>,

    /// Add a tag combination such as `heroi+dc` or `heroi+dc=DC heroes` (repeatable)
    #[arg(long = "combo", global = true)]
    pub combos: Vec<String>,

    /// Start from no combinations instead of the presets file
    #[arg(long, global = true)]
    pub no_presets: bool,
}

/// A `--combo` value split into its tags and optional label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboArg {
    pub tags: Vec<String>,
    pub label: Option<String>,
}

/// Parses `tag+tag[=label]`. Tags may also be separated by commas.
#[must_use]
pub fn parse_combo(raw: &str) -> ComboArg {
    let (tags, label) = match raw.split_once('=') {
        Some((tags, label)) => (tags, Some(label.trim()).filter(|l| !l.is_empty())),
        None => (raw, None),
    };
    let parts: Vec<&str> = tags.split(['+', ',']).collect();
    ComboArg {
        tags: normalize_tags(parts.as_slice()),
        label: label.map(str::to_string),
    }
}

/// Events that take `current` to the state described by `args`.
///
/// # Errors
///
/// Returns an error if `--from` or `--to` is not a recognised date.
pub fn filter_events(
    args: &FilterArgs,
    current: &DashboardState,
    dates: &DateNormalizer,
) -> anyhow::Result<Vec<DashboardEvent>> {
    let mut events = Vec::new();

    if args.from.is_some() || args.to.is_some() {
        let start = match &args.from {
            Some(raw) => dates
                .normalize(raw)
                .map_err(|e| anyhow::anyhow!("--from {raw:?}: {e}"))?,
            None => current.date_range.start,
        };
        let end = match &args.to {
            Some(raw) => dates
                .normalize(raw)
                .map_err(|e| anyhow::anyhow!("--to {raw:?}: {e}"))?,
            None => current.date_range.end,
        };
        events.push(DashboardEvent::SetDateRange(DateRange::new(start, end)));
    }

    if args.min_views.is_some() || args.max_views.is_some() {
        events.push(DashboardEvent::SetViewsRange(VolumeRange::new(
            args.min_views.unwrap_or(current.views_range.min),
            args.max_views.unwrap_or(current.views_range.max),
        )));
    }

    let mut hidden: Vec<Metric> = Vec::new();
    for metric in &args.hide {
        if !hidden.contains(metric) && current.visible_metrics.is_visible(*metric) {
            hidden.push(*metric);
            events.push(DashboardEvent::ToggleMetric(*metric));
        }
    }

    for raw in &args.combos {
        let combo = parse_combo(raw);
        if combo.tags.is_empty() {
            tracing::warn!(combo = %raw, "ignoring combination with no tags");
            continue;
        }
        for tag in &combo.tags {
            if !AVAILABLE_TAGS.contains(&tag.as_str()) {
                tracing::warn!(%tag, "tag is not in the known vocabulary");
            }
            events.push(DashboardEvent::ToggleTag(tag.clone()));
        }
        events.push(DashboardEvent::AddCombination { label: combo.label });
    }

    Ok(events)
}

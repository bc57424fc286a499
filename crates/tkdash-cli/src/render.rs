//! Text and JSON output for each subcommand.

use serde::Serialize;
use tkdash_core::{
    format, DashboardState, DashboardView, DateRange, Metric, TagCombination, VolumeRange,
    AVAILABLE_TAGS, TABLE_COLUMNS,
};
use tkdash_ingest::{DatasetLoad, LoadReport};

const TITLE_WIDTH: usize = 40;

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn truncate(title: &str, width: usize) -> String {
    if title.chars().count() > width {
        format!("{}...", title.chars().take(width - 3).collect::<String>())
    } else {
        title.to_string()
    }
}

/// Warnings for sources that failed or had rejected rows. Goes to stderr so
/// JSON on stdout stays parseable.
pub(crate) fn print_load_warnings(load: &DatasetLoad) {
    for report in load.reports() {
        if let Some(failure) = &report.failure {
            eprintln!(
                "warning: {} data could not be loaded from {}: {failure}",
                report.kind, report.source
            );
        } else if report.rows_rejected() > 0 {
            eprintln!(
                "warning: {} of {} {} rows were rejected; run `tkdash errors` for details",
                report.rows_rejected(),
                report.rows_read,
                report.kind
            );
        }
    }
}

pub(crate) fn print_vocab(json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(AVAILABLE_TAGS);
    }
    for tag in AVAILABLE_TAGS {
        println!("{tag}");
    }
    Ok(())
}

pub(crate) fn print_errors(load: &DatasetLoad, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&load.reports());
    }
    let mut any = false;
    for report in load.reports() {
        for err in &report.row_errors {
            any = true;
            println!("{}:{}: {}", report.source, err.line, err.message);
        }
    }
    if !any {
        println!("no rows were rejected");
    }
    Ok(())
}

pub(crate) fn print_trend(
    view: &DashboardView,
    state: &DashboardState,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        #[derive(Serialize)]
        struct Trend<'a> {
            series: &'a [tkdash_core::SeriesInfo],
            points: &'a [tkdash_core::TrendPoint],
        }
        return print_json(&Trend {
            series: &view.series,
            points: &view.trend,
        });
    }

    let visible: Vec<Metric> = state.visible_metrics.visible().collect();
    if visible.is_empty() {
        println!("all series are hidden");
        return Ok(());
    }
    if view.trend.is_empty() {
        println!("no overview data in the selected range");
        return Ok(());
    }

    let mut header = format!("{:<12}", "DATE");
    for metric in &visible {
        header.push_str(&format!("{:>15}", metric.display_name().to_uppercase()));
    }
    println!("{header}");
    for point in &view.trend {
        let mut line = format!("{:<12}", point.date.format("%Y-%m-%d"));
        for metric in &visible {
            line.push_str(&format!("{:>15}", format::thousands(point.value(*metric))));
        }
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn print_scatter(view: &DashboardView, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&view.duration_views);
    }
    if view.duration_views.is_empty() {
        println!("no videos in the selected range");
        return Ok(());
    }
    println!("{:<42}{:>10}{:>12}", "VIDEO", "DURATION", "VIEWS");
    for point in &view.duration_views {
        let marker = if point.highlighted { " *" } else { "" };
        println!(
            "{:<42}{:>10}{:>12}{marker}",
            truncate(&point.video_title, TITLE_WIDTH),
            format::seconds(point.total_video_time),
            format::thousands(point.total_views),
        );
    }
    println!();
    println!(
        "* more than {} views",
        format::thousands(tkdash_core::view::HIGHLIGHT_VIEWS_THRESHOLD)
    );
    Ok(())
}

pub(crate) fn print_engagement(view: &DashboardView, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&view.engagement_watch);
    }
    if view.engagement_watch.is_empty() {
        println!("no videos in the selected range");
        return Ok(());
    }
    println!("{:<42}{:>12}{:>12}", "VIDEO", "ENGAGEMENT", "WATCH TIME");
    let mut flagged = 0usize;
    for point in &view.engagement_watch {
        let marker = if point.flagged {
            flagged += 1;
            " !"
        } else {
            ""
        };
        println!(
            "{:<42}{:>12}{:>12}{marker}",
            truncate(&point.video_title, TITLE_WIDTH),
            format::percent(point.engagement_percent),
            format::percent(point.watch_time_percent),
        );
    }
    if flagged > 0 {
        println!();
        println!("! {flagged} video(s) have zero views or zero duration; rates shown as 0");
    }
    Ok(())
}

pub(crate) fn print_tags(view: &DashboardView, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&view.tag_buckets);
    }
    if view.tag_buckets.is_empty() {
        println!("no tag combinations defined");
        return Ok(());
    }
    for bucket in &view.tag_buckets {
        println!(
            "[{}] {} ({} videos)",
            bucket.id,
            bucket.label,
            bucket.points.len()
        );
        for point in &bucket.points {
            let marker = if point.engagement_undefined { " !" } else { "" };
            println!(
                "    {:<42}{:>10}{:>12}{marker}",
                truncate(&point.video_title, TITLE_WIDTH),
                format::percent(point.engagement),
                format::thousands(point.views),
            );
        }
    }
    Ok(())
}

pub(crate) fn print_boxplots(view: &DashboardView, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&view.box_plots);
    }
    if view.box_plots.is_empty() {
        println!("no tag combinations defined");
        return Ok(());
    }
    println!(
        "{:<28}{:>4}{:>10}{:>10}{:>10}{:>10}{:>10}",
        "COMBINATION", "N", "MIN", "Q1", "MEDIAN", "Q3", "MAX"
    );
    for series in &view.box_plots {
        let s = &series.stats;
        println!(
            "{:<28}{:>4}{:>10}{:>10}{:>10}{:>10}{:>10}",
            truncate(&series.label, 26),
            s.count,
            format::percent(s.min),
            format::percent(s.q1),
            format::percent(s.median),
            format::percent(s.q3),
            format::percent(s.max),
        );
        for outlier in &s.outliers {
            println!(
                "    outlier {} ({})",
                format::percent(outlier.value),
                outlier.label
            );
        }
        if !series.excluded.is_empty() {
            println!(
                "    excluded (no views): {}",
                series.excluded.join(", ")
            );
        }
    }
    Ok(())
}

pub(crate) fn print_table(view: &DashboardView, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(&view.table);
    }

    let rows: Vec<[String; 10]> = view.table.iter().map(tkdash_core::TableRow::cells).collect();
    let mut widths: Vec<usize> = TABLE_COLUMNS.iter().map(|c| c.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    println!("{}", table_line(TABLE_COLUMNS.iter().copied(), &widths));
    for row in &rows {
        println!("{}", table_line(row.iter().map(String::as_str), &widths));
    }
    Ok(())
}

/// First column left-aligned, the rest right-aligned.
fn table_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths.iter().copied())
        .enumerate()
        .map(|(i, (cell, width))| {
            if i == 0 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

#[derive(Serialize)]
struct Summary<'a> {
    date_range: DateRange,
    views_range: VolumeRange,
    visible_metrics: Vec<Metric>,
    combinations: &'a [TagCombination],
    overview_in_range: usize,
    content_in_range: usize,
    flagged_videos: usize,
    reports: [&'a LoadReport; 2],
}

pub(crate) fn print_summary(
    view: &DashboardView,
    state: &DashboardState,
    load: &DatasetLoad,
    json: bool,
) -> anyhow::Result<()> {
    let summary = Summary {
        date_range: state.date_range,
        views_range: state.views_range,
        visible_metrics: state.visible_metrics.visible().collect(),
        combinations: state.combinations.as_slice(),
        overview_in_range: view.trend.len(),
        content_in_range: view.duration_views.len(),
        flagged_videos: view.engagement_watch.iter().filter(|p| p.flagged).count(),
        reports: load.reports(),
    };
    if json {
        return print_json(&summary);
    }

    println!(
        "Date range:   {} .. {}{}",
        summary.date_range.start,
        summary.date_range.end,
        if summary.date_range.is_inverted() {
            " (inverted, matches nothing)"
        } else {
            ""
        }
    );
    println!(
        "Views range:  {} .. {}{}",
        format::thousands(summary.views_range.min),
        format::thousands(summary.views_range.max),
        if summary.views_range.is_inverted() {
            " (inverted, matches nothing)"
        } else {
            ""
        }
    );
    let names: Vec<&str> = summary
        .visible_metrics
        .iter()
        .map(|m| m.display_name())
        .collect();
    println!("Series shown: {}", names.join(", "));
    println!("Combinations:");
    for combination in summary.combinations {
        println!("  [{}] {}", combination.id, combination.label);
    }
    println!();
    for report in summary.reports {
        let status = match &report.failure {
            Some(failure) => format!("failed: {failure}"),
            None => format!(
                "{} rows read, {} used, {} rejected",
                report.rows_read,
                report.rows_used,
                report.rows_rejected()
            ),
        };
        println!("{:<9} {} ({status})", report.kind, report.source);
    }
    println!(
        "In range: {} overview days, {} videos ({} flagged)",
        summary.overview_in_range, summary.content_in_range, summary.flagged_videos
    );
    Ok(())
}

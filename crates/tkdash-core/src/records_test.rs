use super::*;

fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// -----------------------------------------------------------------------
// field coercion
// -----------------------------------------------------------------------

#[test]
fn count_strips_thousands_separators() {
    assert_eq!(parse_count(Some("12,345")), 12_345);
    assert_eq!(parse_count(Some("1,234,567")), 1_234_567);
}

#[test]
fn count_missing_or_blank_is_zero() {
    assert_eq!(parse_count(None), 0);
    assert_eq!(parse_count(Some("")), 0);
    assert_eq!(parse_count(Some("   ")), 0);
}

#[test]
fn count_unparsable_is_zero() {
    assert_eq!(parse_count(Some("n/a")), 0);
    assert_eq!(parse_count(Some("-5")), 0);
    assert_eq!(parse_count(Some("1.5K")), 0);
}

#[test]
fn count_tolerates_surrounding_whitespace() {
    assert_eq!(parse_count(Some(" 42 ")), 42);
}

#[test]
fn decimal_parses_and_degrades() {
    assert!((parse_decimal(Some("12.5")) - 12.5).abs() < f64::EPSILON);
    assert!((parse_decimal(Some("1,024.5")) - 1024.5).abs() < f64::EPSILON);
    assert_eq!(parse_decimal(None), 0.0);
    assert_eq!(parse_decimal(Some("abc")), 0.0);
    assert_eq!(parse_decimal(Some("NaN")), 0.0);
    assert_eq!(parse_decimal(Some("inf")), 0.0);
}

#[test]
fn percentage_strips_trailing_percent_sign() {
    assert!((parse_percentage(Some("45.3%")) - 45.3).abs() < f64::EPSILON);
    assert!((parse_percentage(Some(" 7% ")) - 7.0).abs() < f64::EPSILON);
    assert!((parse_percentage(Some("12.25")) - 12.25).abs() < f64::EPSILON);
    assert_eq!(parse_percentage(Some("%")), 0.0);
    assert_eq!(parse_percentage(None), 0.0);
}

#[test]
fn percentage_is_clamped_to_valid_range() {
    assert_eq!(parse_percentage(Some("150%")), 100.0);
    assert_eq!(parse_percentage(Some("-3%")), 0.0);
    assert_eq!(parse_percentage(Some("100%")), 100.0);
}

#[test]
fn text_missing_is_empty() {
    assert_eq!(parse_text(None), "");
    assert_eq!(parse_text(Some("My video")), "My video");
}

// -----------------------------------------------------------------------
// OverviewRecord
// -----------------------------------------------------------------------

#[test]
fn overview_row_parses_all_fields() {
    let r = row(&[
        ("Date", "2024-02-15"),
        ("Video Views", "150,000"),
        ("Profile Views", "3,210"),
        ("Likes", "9,876"),
        ("Comments", "321"),
        ("Shares", "45"),
    ]);
    let rec = OverviewRecord::from_row(&r, &DateNormalizer::default()).unwrap();
    assert_eq!(rec.date, ymd(2024, 2, 15));
    assert_eq!(rec.video_views, 150_000);
    assert_eq!(rec.profile_views, 3_210);
    assert_eq!(rec.likes, 9_876);
    assert_eq!(rec.comments, 321);
    assert_eq!(rec.shares, 45);
}

#[test]
fn overview_row_missing_numbers_default_to_zero() {
    let r = row(&[("Date", "2024-02-15"), ("Video Views", "")]);
    let rec = OverviewRecord::from_row(&r, &DateNormalizer::default()).unwrap();
    assert_eq!(rec.video_views, 0);
    assert_eq!(rec.profile_views, 0);
    assert_eq!(rec.shares, 0);
}

#[test]
fn overview_row_without_date_is_rejected() {
    let r = row(&[("Video Views", "10")]);
    let err = OverviewRecord::from_row(&r, &DateNormalizer::default()).unwrap_err();
    assert_eq!(err, RecordError::MissingDate { column: "Date" });

    let r = row(&[("Date", "  "), ("Video Views", "10")]);
    let err = OverviewRecord::from_row(&r, &DateNormalizer::default()).unwrap_err();
    assert_eq!(err, RecordError::MissingDate { column: "Date" });
}

#[test]
fn overview_row_with_bad_date_is_rejected_not_defaulted() {
    let r = row(&[("Date", "February 15"), ("Video Views", "10")]);
    let err = OverviewRecord::from_row(&r, &DateNormalizer::default()).unwrap_err();
    assert!(matches!(
        err,
        RecordError::InvalidDate { column: "Date", ref raw, .. } if raw == "February 15"
    ));
}

// -----------------------------------------------------------------------
// ContentRecord
// -----------------------------------------------------------------------

fn content_row() -> RawRow {
    row(&[
        ("Post day", "15/02/24"),
        ("Video title", "Spider-Man as a medieval knight"),
        ("Total video time", "32.5"),
        ("Total views", "1,000"),
        ("Total likes", "100"),
        ("Total comments", "20"),
        ("Total shares", "5"),
        ("Total saves", "5"),
        ("Avg watch time", "13"),
        ("Full watch percentage", "18.4%"),
        ("New followers", "12"),
        ("tags1", " Heroi "),
        ("tags2", "Marvel"),
    ])
}

#[test]
fn content_row_parses_all_fields() {
    let rec = ContentRecord::from_row(&content_row(), &DateNormalizer::default()).unwrap();
    assert_eq!(rec.post_day, ymd(2024, 2, 15));
    assert_eq!(rec.video_title, "Spider-Man as a medieval knight");
    assert!((rec.total_video_time - 32.5).abs() < f64::EPSILON);
    assert_eq!(rec.total_views, 1_000);
    assert_eq!(rec.total_likes, 100);
    assert_eq!(rec.total_comments, 20);
    assert_eq!(rec.total_shares, 5);
    assert_eq!(rec.total_saves, 5);
    assert!((rec.avg_watch_time - 13.0).abs() < f64::EPSILON);
    assert!((rec.full_watch_percentage - 18.4).abs() < f64::EPSILON);
    assert_eq!(rec.new_followers, 12);
    assert_eq!(rec.tags1.as_deref(), Some("Heroi"));
    assert_eq!(rec.tags2.as_deref(), Some("Marvel"));
}

#[test]
fn content_row_blank_tags_are_none() {
    let mut r = content_row();
    r.insert("tags1".to_string(), "   ".to_string());
    r.remove("tags2");
    let rec = ContentRecord::from_row(&r, &DateNormalizer::default()).unwrap();
    assert!(rec.tags1.is_none());
    assert!(rec.tags2.is_none());
}

#[test]
fn content_row_missing_title_is_empty_string() {
    let mut r = content_row();
    r.remove("Video title");
    let rec = ContentRecord::from_row(&r, &DateNormalizer::default()).unwrap();
    assert_eq!(rec.video_title, "");
}

#[test]
fn content_row_without_post_day_is_rejected() {
    let mut r = content_row();
    r.remove("Post day");
    let err = ContentRecord::from_row(&r, &DateNormalizer::default()).unwrap_err();
    assert_eq!(err, RecordError::MissingDate { column: "Post day" });
}

// -----------------------------------------------------------------------
// RowError
// -----------------------------------------------------------------------

#[test]
fn row_error_carries_line_column_and_raw_text() {
    let err = RecordError::InvalidDate {
        column: "Post day",
        raw: "31/31/24".to_string(),
        source: DateParseError::InvalidCalendarDate("31/31/24".to_string()),
    };
    let row_err = RowError::from_record_error(7, &err);
    assert_eq!(row_err.line, 7);
    assert_eq!(row_err.column.as_deref(), Some("Post day"));
    assert_eq!(row_err.raw.as_deref(), Some("31/31/24"));
    assert!(row_err.message.contains("Post day"));
}

#[test]
fn row_error_for_missing_date_has_no_raw_text() {
    let row_err = RowError::from_record_error(3, &RecordError::MissingDate { column: "Date" });
    assert_eq!(row_err.line, 3);
    assert!(row_err.raw.is_none());
}

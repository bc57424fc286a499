//! Load-once orchestration for both exports.

use serde::Serialize;
use tkdash_core::{
    AppConfig, ContentRecord, Dataset, DateNormalizer, OverviewRecord, RawRow, RecordError,
    RowError,
};

use crate::error::IngestError;
use crate::fetch::SourceFetcher;
use crate::rows::read_rows;
use crate::source::{CsvSource, SourceKind};

/// A record type the loader can build from a raw row.
pub trait FromRow: Sized {
    const KIND: SourceKind;

    /// # Errors
    ///
    /// Returns [`RecordError`] when the row has no usable date.
    fn from_row(row: &RawRow, dates: &DateNormalizer) -> Result<Self, RecordError>;
}

impl FromRow for OverviewRecord {
    const KIND: SourceKind = SourceKind::Overview;

    fn from_row(row: &RawRow, dates: &DateNormalizer) -> Result<Self, RecordError> {
        OverviewRecord::from_row(row, dates)
    }
}

impl FromRow for ContentRecord {
    const KIND: SourceKind = SourceKind::Content;

    fn from_row(row: &RawRow, dates: &DateNormalizer) -> Result<Self, RecordError> {
        ContentRecord::from_row(row, dates)
    }
}

/// What happened while loading one source.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub kind: SourceKind,
    pub source: String,
    pub rows_read: usize,
    pub rows_used: usize,
    pub row_errors: Vec<RowError>,
    /// Set when the source could not be fetched or read at all.
    pub failure: Option<String>,
}

impl LoadReport {
    fn failed(kind: SourceKind, source: String, err: &IngestError) -> Self {
        Self {
            kind,
            source,
            rows_read: 0,
            rows_used: 0,
            row_errors: Vec::new(),
            failure: Some(err.to_string()),
        }
    }

    #[must_use]
    pub fn rows_rejected(&self) -> usize {
        self.row_errors.len()
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Records parsed from one CSV document, with the rows that were rejected.
#[derive(Debug)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub rows_read: usize,
    pub row_errors: Vec<RowError>,
}

/// Parses CSV `text` into records of type `T`.
///
/// Rows without a usable date are reported in `row_errors`; every other
/// field problem degrades that field to its default.
///
/// # Errors
///
/// Returns [`IngestError::Header`] if the header row cannot be read.
pub fn parse_records<T: FromRow>(
    text: &str,
    dates: &DateNormalizer,
) -> Result<Parsed<T>, IngestError> {
    let raw = read_rows(text)?;
    let rows_read = raw.rows.len() + raw.errors.len();
    let mut row_errors = raw.errors;
    let mut records = Vec::with_capacity(raw.rows.len());

    for (line, row) in &raw.rows {
        match T::from_row(row, dates) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::debug!(kind = %T::KIND, line, error = %e, "row rejected");
                row_errors.push(RowError::from_record_error(*line, &e));
            }
        }
    }
    row_errors.sort_by_key(|e| e.line);

    Ok(Parsed {
        records,
        rows_read,
        row_errors,
    })
}

/// Resolved sources plus the shared fetcher and date rules.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    fetcher: SourceFetcher,
    overview: CsvSource,
    content: CsvSource,
    dates: DateNormalizer,
}

impl DatasetLoader {
    #[must_use]
    pub fn new(
        fetcher: SourceFetcher,
        overview: CsvSource,
        content: CsvSource,
        dates: DateNormalizer,
    ) -> Self {
        Self {
            fetcher,
            overview,
            content,
            dates,
        }
    }

    /// # Errors
    ///
    /// Returns [`IngestError`] if a source location is blank or the HTTP
    /// client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, IngestError> {
        Ok(Self {
            fetcher: SourceFetcher::new(config.fetch_timeout_secs, &config.user_agent)?,
            overview: CsvSource::parse(SourceKind::Overview, &config.overview_source)?,
            content: CsvSource::parse(SourceKind::Content, &config.content_source)?,
            dates: DateNormalizer::new(config.century),
        })
    }

    async fn load_one<T: FromRow>(&self, source: &CsvSource) -> (Vec<T>, LoadReport) {
        let kind = T::KIND;
        let location = source.to_string();

        let parsed = match self.fetcher.fetch_text(source).await {
            Ok(text) => parse_records::<T>(&text, &self.dates),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(parsed) => {
                if !parsed.row_errors.is_empty() {
                    tracing::warn!(
                        %kind,
                        source = %location,
                        rejected = parsed.row_errors.len(),
                        "some rows were rejected"
                    );
                }
                tracing::info!(
                    %kind,
                    source = %location,
                    rows_read = parsed.rows_read,
                    rows_used = parsed.records.len(),
                    "loaded CSV source"
                );
                let report = LoadReport {
                    kind,
                    source: location,
                    rows_read: parsed.rows_read,
                    rows_used: parsed.records.len(),
                    row_errors: parsed.row_errors,
                    failure: None,
                };
                (parsed.records, report)
            }
            Err(e) => {
                tracing::warn!(%kind, source = %location, error = %e, "failed to load CSV source");
                (Vec::new(), LoadReport::failed(kind, location, &e))
            }
        }
    }
}

/// The session dataset and how each source fared.
#[derive(Debug, Clone)]
pub struct DatasetLoad {
    pub dataset: Dataset,
    pub overview: LoadReport,
    pub content: LoadReport,
}

impl DatasetLoad {
    #[must_use]
    pub fn reports(&self) -> [&LoadReport; 2] {
        [&self.overview, &self.content]
    }
}

/// Loads both sources concurrently. Never fails: a source that cannot be
/// loaded contributes an empty collection and a failed report.
pub async fn load_dataset(loader: &DatasetLoader) -> DatasetLoad {
    let ((overview, overview_report), (content, content_report)) = tokio::join!(
        loader.load_one::<OverviewRecord>(&loader.overview),
        loader.load_one::<ContentRecord>(&loader.content),
    );

    DatasetLoad {
        dataset: Dataset { overview, content },
        overview: overview_report,
        content: content_report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_overview_document() {
        let text = "Date,Video Views,Profile Views,Likes,Comments,Shares\n\
                    2024-02-01,\"120,455\",\"1,530\",\"9,874\",301,77\n\
                    2024-02-02,,1,2,3,4\n";
        let parsed = parse_records::<OverviewRecord>(text, &DateNormalizer::default()).unwrap();
        assert_eq!(parsed.rows_read, 2);
        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].video_views, 120_455);
        assert_eq!(parsed.records[1].video_views, 0);
        assert!(parsed.row_errors.is_empty());
    }

    #[test]
    fn rows_without_dates_are_reported_with_line_numbers() {
        let text = "Post day,Video title,Total views\n\
                    01/02/24,first,10\n\
                    ,no date,20\n\
                    someday,bad date,30\n\
                    03/02/24,last,40\n";
        let parsed = parse_records::<ContentRecord>(text, &DateNormalizer::default()).unwrap();
        assert_eq!(parsed.rows_read, 4);
        let titles: Vec<&str> = parsed.records.iter().map(|r| r.video_title.as_str()).collect();
        assert_eq!(titles, vec!["first", "last"]);
        let lines: Vec<usize> = parsed.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4]);
        assert_eq!(parsed.row_errors[1].raw.as_deref(), Some("someday"));
    }

    #[test]
    fn empty_document_yields_no_records() {
        let parsed = parse_records::<OverviewRecord>("", &DateNormalizer::default()).unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.rows_read, 0);
    }

    #[test]
    fn failed_report_carries_message() {
        let err = IngestError::UnexpectedStatus {
            status: 404,
            url: "http://x/o.csv".to_string(),
        };
        let report = LoadReport::failed(SourceKind::Overview, "http://x/o.csv".to_string(), &err);
        assert!(report.is_failed());
        assert_eq!(report.rows_used, 0);
        assert!(report.failure.unwrap().contains("404"));
    }
}

//! Where a CSV export lives.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::IngestError;

/// Which of the two exports a source holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Overview,
    Content,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Overview => write!(f, "overview"),
            SourceKind::Content => write!(f, "content"),
        }
    }
}

/// A CSV location: an `http(s)` URL or a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSource {
    Url(String),
    Path(PathBuf),
}

impl CsvSource {
    /// Classifies `location` by its scheme. Anything that is not `http://` or
    /// `https://` is treated as a path.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::EmptySource`] for a blank location.
    pub fn parse(kind: SourceKind, location: &str) -> Result<Self, IngestError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(IngestError::EmptySource { kind });
        }
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(CsvSource::Url(location.to_string()))
        } else {
            Ok(CsvSource::Path(PathBuf::from(location)))
        }
    }
}

impl std::fmt::Display for CsvSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CsvSource::Url(url) => f.write_str(url),
            CsvSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

//! Load boundary for the dashboard: fetches the two CSV exports once, splits
//! them into header-keyed rows and runs the record parser over each row.
//!
//! A failed fetch never aborts the other source. It yields an empty
//! collection plus a [`LoadReport`] carrying the failure message.

pub mod error;
pub mod fetch;
pub mod load;
pub mod rows;
pub mod source;

pub use error::IngestError;
pub use fetch::SourceFetcher;
pub use load::{load_dataset, parse_records, DatasetLoad, DatasetLoader, FromRow, LoadReport, Parsed};
pub use rows::{read_rows, RawRows};
pub use source::{CsvSource, SourceKind};

//! Reads a CSV source into memory, from disk or over HTTP.

use std::time::Duration;

use reqwest::Client;

use crate::error::IngestError;
use crate::source::CsvSource;

/// Fetches CSV text. One instance is shared by both sources.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    /// # Errors
    ///
    /// Returns [`IngestError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, IngestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Returns the full text of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Io`] when a file cannot be read,
    /// [`IngestError::Http`] on transport failure and
    /// [`IngestError::UnexpectedStatus`] for a non-success HTTP status.
    pub async fn fetch_text(&self, source: &CsvSource) -> Result<String, IngestError> {
        match source {
            CsvSource::Path(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| IngestError::Io {
                        path: path.display().to_string(),
                        source: e,
                    })
            }
            CsvSource::Url(url) => {
                let response = self.client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(IngestError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.clone(),
                    });
                }
                Ok(response.text().await?)
            }
        }
    }
}

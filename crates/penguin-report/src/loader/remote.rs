//! CSV fetched over HTTP.

use super::source::{DatasetSource, read_csv_str};
use crate::error::{ReportError, Result};
use polars::prelude::*;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

/// Downloads the dataset with a blocking GET request.
///
/// The request has no timeout: a server that never answers blocks the run.
#[derive(Debug, Clone)]
pub struct RemoteCsvSource {
    name: String,
    url: String,
}

impl RemoteCsvSource {
    /// Create a source named `name` fetching `url`.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl DatasetSource for RemoteCsvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<DataFrame> {
        // the blocking client would otherwise stop after 30 s
        let client = Client::builder().timeout(None::<Duration>).build()?;

        debug!("Fetching CSV from {}", self.url);
        let response = client.get(&self.url).send()?;

        if !response.status().is_success() {
            return Err(ReportError::SourceUnavailable {
                source_name: self.name.clone(),
                reason: format!("HTTP status {} from {}", response.status(), self.url),
            });
        }

        let body = response.text()?;
        read_csv_str(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_settings() {
        let source = RemoteCsvSource::new("remote", "https://example.com/penguins.csv");
        assert_eq!(source.name(), "remote");
        assert_eq!(source.url(), "https://example.com/penguins.csv");
    }

    #[test]
    fn test_unreachable_host_fails() {
        // Port 9 on loopback refuses connections, no real network involved.
        let source = RemoteCsvSource::new("remote", "http://127.0.0.1:9/penguins.csv");
        let error = source.load().unwrap_err();
        assert_eq!(error.error_code(), "HTTP_REQUEST_ERROR");
    }
}

//! CSV file on the local filesystem.

use super::source::{DatasetSource, csv_read_options};
use crate::error::{ReportError, Result, ResultExt};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the dataset from a local CSV file.
#[derive(Debug, Clone)]
pub struct LocalCsvSource {
    name: String,
    path: PathBuf,
}

impl LocalCsvSource {
    /// Create a source named `name` reading from `path`.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Path of the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for LocalCsvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<DataFrame> {
        if !self.path.is_file() {
            return Err(ReportError::SourceUnavailable {
                source_name: self.name.clone(),
                reason: format!("file not found: {}", self.path.display()),
            });
        }

        debug!("Reading CSV from {}", self.path.display());
        csv_read_options()
            .try_into_reader_with_file_path(Some(self.path.clone()))
            .and_then(|reader| reader.finish())
            .context(format!("Reading CSV '{}'", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_is_unavailable() {
        let source = LocalCsvSource::new("bundled", "/definitely/not/here/penguins.csv");
        let error = source.load().unwrap_err();
        assert_eq!(error.error_code(), "SOURCE_UNAVAILABLE");
        assert!(error.to_string().contains("bundled"));
    }

    #[test]
    fn test_reads_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("penguins.csv");
        fs::write(&path, "species,island\nAdelie,Dream\nGentoo,Biscoe\n").unwrap();

        let source = LocalCsvSource::new("bundled", &path);
        let df = source.load().unwrap();
        assert_eq!(df.shape(), (2, 2));
        assert_eq!(source.path(), path.as_path());
    }
}

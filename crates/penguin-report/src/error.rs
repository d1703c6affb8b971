//! Custom error types for the report pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Library code
//! returns [`Result`]; the binary wraps everything in `anyhow` at the edge.
//!
//! Errors are serializable so the `--json` run summary can carry them.

use plotters::drawing::DrawingAreaErrorKind;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// A single dataset source that was tried and failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    /// Name of the source (e.g. "bundled", "remote").
    pub source: String,
    /// Rendered error message.
    pub reason: String,
}

/// The main error type for the report pipeline.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A source returned a table without one of the expected columns.
    #[error("Dataset is missing required column '{0}'")]
    SchemaMismatch(String),

    /// A source returned a table with zero rows.
    #[error("Dataset from '{0}' contains no rows")]
    EmptyDataset(String),

    /// A source could not produce data at all (missing file, bad status).
    #[error("Dataset source '{source_name}' unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// Every configured source failed.
    #[error("All dataset sources failed: {}", format_failures(.0))]
    AllSourcesFailed(Vec<SourceFailure>),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A chart could not be rendered.
    #[error("Failed to render chart '{chart}': {reason}")]
    ChartFailed { chart: String, reason: String },

    /// The data handed to a chart renderer has nothing to draw.
    #[error("No data to plot: {0}")]
    NoChartData(String),

    /// Plotters drawing backend error.
    #[error("Drawing error: {0}")]
    Drawing(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// HTTP request error from the remote source.
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReportError>,
    },
}

fn format_failures(failures: &[SourceFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("[{}] {}", f.source, f.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ReportError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReportError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, useful for the JSON summary and for tests.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SchemaMismatch(_) => "SCHEMA_MISMATCH",
            Self::EmptyDataset(_) => "EMPTY_DATASET",
            Self::SourceUnavailable { .. } => "SOURCE_UNAVAILABLE",
            Self::AllSourcesFailed(_) => "ALL_SOURCES_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ChartFailed { .. } => "CHART_FAILED",
            Self::NoChartData(_) => "NO_CHART_DATA",
            Self::Drawing(_) => "DRAWING_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Http(_) => "HTTP_REQUEST_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Failures collected by the loader, if this is (or wraps) a loader error.
    pub fn source_failures(&self) -> Option<&[SourceFailure]> {
        match self {
            Self::AllSourcesFailed(failures) => Some(failures),
            Self::WithContext { source, .. } => source.source_failures(),
            _ => None,
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for ReportError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        ReportError::Drawing(err.to_string())
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ReportError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ReportError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ReportError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ReportError::Io(e).with_context(context))
    }
}

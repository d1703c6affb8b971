//! Dataset loading with an ordered fallback chain.
//!
//! Sources are tried in order until one yields a non-empty table with the
//! expected columns. Each failure is logged and kept; when every source has
//! failed the run stops with [`ReportError::AllSourcesFailed`].
//!
//! # Example
//!
//! ```rust,ignore
//! use penguin_report::config::ReportConfig;
//! use penguin_report::loader::DatasetLoader;
//!
//! let loader = DatasetLoader::from_config(&ReportConfig::default());
//! let dataset = loader.load()?;
//! println!("{} rows from {}", dataset.frame.height(), dataset.source);
//! ```

mod embedded;
mod local;
mod remote;
mod source;

pub use embedded::{EmbeddedCsvSource, PACKAGED_DATASET};
pub use local::LocalCsvSource;
pub use remote::RemoteCsvSource;
pub use source::{DatasetSource, NULL_TOKEN, read_csv_str};

use crate::config::ReportConfig;
use crate::error::{ReportError, Result, SourceFailure};
use crate::types::{SCHEMA_COLUMNS, is_numeric_column};
use polars::prelude::*;
use tracing::{debug, info, warn};

/// Names of the default sources, in fallback order.
pub const BUNDLED_SOURCE: &str = "bundled";
pub const PACKAGED_SOURCE: &str = "packaged";
pub const REMOTE_SOURCE: &str = "remote";

/// The normalized observation table and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// Table with exactly the schema columns, in schema order.
    pub frame: DataFrame,
    /// Name of the source that succeeded.
    pub source: String,
    /// Sources tried (and failed) before it.
    pub failed: Vec<SourceFailure>,
}

/// Tries each [`DatasetSource`] in order.
pub struct DatasetLoader {
    sources: Vec<Box<dyn DatasetSource>>,
}

impl DatasetLoader {
    /// Create a loader over an explicit source list.
    pub fn new(sources: Vec<Box<dyn DatasetSource>>) -> Self {
        Self { sources }
    }

    /// The default chain: bundled copy, packaged copy, remote CSV.
    ///
    /// The packaged copy is compiled in, so the chain only reaches the
    /// network when that copy fails to parse.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(vec![
            Box::new(LocalCsvSource::new(
                BUNDLED_SOURCE,
                config.bundled_dataset_path.clone(),
            )),
            Box::new(EmbeddedCsvSource::packaged(PACKAGED_SOURCE)),
            Box::new(RemoteCsvSource::new(
                REMOTE_SOURCE,
                config.remote_dataset_url.clone(),
            )),
        ])
    }

    /// Source names in the order they will be tried.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Load from the first source that works.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::AllSourcesFailed`] with one entry per source
    /// when none of them produced usable data.
    pub fn load(&self) -> Result<LoadedDataset> {
        let mut failed = Vec::new();

        for source in &self.sources {
            let name = source.name();
            debug!("Trying dataset source '{}'", name);

            match source.load().and_then(|df| normalize_frame(df, name)) {
                Ok(frame) => {
                    info!(
                        "Loaded {} rows from dataset source '{}'",
                        frame.height(),
                        name
                    );
                    return Ok(LoadedDataset {
                        frame,
                        source: name.to_string(),
                        failed,
                    });
                }
                Err(e) => {
                    warn!("Dataset source '{}' failed: {}", name, e);
                    failed.push(SourceFailure {
                        source: name.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Err(ReportError::AllSourcesFailed(failed))
    }
}

/// Select the schema columns in order and coerce their types.
///
/// Measurement columns become `Float64`, categorical columns `String`.
/// Unparseable values turn into nulls rather than errors.
///
/// # Errors
///
/// - [`ReportError::SchemaMismatch`] if a schema column is absent
/// - [`ReportError::EmptyDataset`] if the table has no rows
pub fn normalize_frame(df: DataFrame, source: &str) -> Result<DataFrame> {
    if let Some(missing) = SCHEMA_COLUMNS
        .iter()
        .find(|name| df.get_column_index(name).is_none())
    {
        return Err(ReportError::SchemaMismatch((*missing).to_string()));
    }

    let exprs: Vec<Expr> = SCHEMA_COLUMNS
        .iter()
        .map(|&name| {
            let dtype = if is_numeric_column(name) {
                DataType::Float64
            } else {
                DataType::String
            };
            col(name).cast(dtype)
        })
        .collect();

    let frame = df.lazy().select(exprs).collect()?;

    if frame.height() == 0 {
        return Err(ReportError::EmptyDataset(source.to_string()));
    }

    Ok(frame)
}

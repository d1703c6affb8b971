//! CSV text compiled into the binary.

use super::source::{DatasetSource, read_csv_str};
use crate::error::{Result, ResultExt};
use polars::prelude::*;
use tracing::debug;

/// Copy of the dataset shipped inside the crate.
///
/// An abbreviated extract of the Palmer penguins table: the same columns and
/// `NA` convention, covering all three species and islands.
pub const PACKAGED_DATASET: &str = include_str!("../../data/penguins.csv");

/// Reads the dataset from CSV text held in memory.
#[derive(Debug, Clone)]
pub struct EmbeddedCsvSource {
    name: String,
    content: &'static str,
}

impl EmbeddedCsvSource {
    /// Create a source named `name` over `content`.
    pub fn new(name: impl Into<String>, content: &'static str) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    /// The copy packaged with the crate.
    pub fn packaged(name: impl Into<String>) -> Self {
        Self::new(name, PACKAGED_DATASET)
    }
}

impl DatasetSource for EmbeddedCsvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<DataFrame> {
        debug!("Reading {} bytes of embedded CSV", self.content.len());
        read_csv_str(self.content).context(format!("Parsing embedded CSV '{}'", self.name))
    }
}

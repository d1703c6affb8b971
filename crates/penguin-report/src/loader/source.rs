//! Dataset source trait and shared CSV parsing.
//!
//! A [`DatasetSource`] produces a raw table; normalization and the fallback
//! chain live in the parent module. Tests plug in their own sources to keep
//! the pipeline away from the filesystem and the network.
//!
//! # Example
//!
//! ```rust,ignore
//! use penguin_report::loader::DatasetSource;
//! use polars::prelude::*;
//!
//! struct Fixed(DataFrame);
//!
//! impl DatasetSource for Fixed {
//!     fn name(&self) -> &str {
//!         "fixed"
//!     }
//!
//!     fn load(&self) -> penguin_report::Result<DataFrame> {
//!         Ok(self.0.clone())
//!     }
//! }
//! ```

use crate::error::Result;
use polars::prelude::*;
use std::io::Cursor;

/// Token the dataset uses for missing values.
pub const NULL_TOKEN: &str = "NA";

/// Rows used for schema inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// Anything that can provide the raw observation table.
///
/// Implementations should fail fast: the loader moves on to the next source
/// on any error and never retries.
pub trait DatasetSource: Send + Sync {
    /// Short name used in logs and failure reports.
    fn name(&self) -> &str;

    /// Produce the raw table. Column selection and casting happen later.
    fn load(&self) -> Result<DataFrame>;
}

/// CSV options shared by every source: header row, `NA` as null.
pub(crate) fn csv_read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(NullValues::AllColumnsSingle(NULL_TOKEN.into()))),
        )
}

/// Parse CSV text held in memory.
pub fn read_csv_str(content: &str) -> Result<DataFrame> {
    let cursor = Cursor::new(content.to_owned());
    let df = csv_read_options()
        .into_reader_with_file_handle(cursor)
        .finish()?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv_str_treats_na_as_null() {
        let csv = "species,body_mass_g\nAdelie,3750\nGentoo,NA\n";
        let df = read_csv_str(csv).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("body_mass_g").unwrap().null_count(), 1);
        assert!(crate::utils::is_numeric_dtype(
            df.column("body_mass_g").unwrap().dtype()
        ));
    }

    #[test]
    fn test_read_csv_str_header_only() {
        let df = read_csv_str("species,island\n").unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 2);
    }
}

//! Report generation module.
//!
//! This module turns the computed tables and rendered charts into the
//! markdown document:
//! - [`markdown`] renders pipe-format tables and `%g` style numbers
//! - [`ReportWriter`] assembles the fixed section layout and writes the file
//!
//! # Example
//!
//! ```rust,ignore
//! use penguin_report::reporting::{ReportContent, ReportWriter};
//!
//! let content = ReportContent {
//!     head_rows: 10,
//!     head_table: head.to_markdown(),
//!     charts: outcome.records.clone(),
//!     ..Default::default()
//! };
//! ReportWriter::write("penguins_analysis.md", &content)?;
//! ```

mod generator;
pub mod markdown;

pub use generator::{REPORT_FOOTER, ReportContent, ReportWriter};
pub use markdown::{Align, Cell, MarkdownTable, format_general};

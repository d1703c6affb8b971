//! Penguin Report
//!
//! Exploratory analysis report generator for the Palmer penguins dataset,
//! built on Polars for the tables and Plotters for the charts.
//!
//! # Overview
//!
//! A run produces one markdown document and a directory of SVG charts:
//!
//! - **Loading**: the dataset comes from the first working source in a
//!   fallback chain (bundled CSV, the copy compiled into the crate, remote CSV)
//! - **Statistics**: head rows, describe table, per-column missing counts
//! - **Cross-tabulation**: species × island counts and mean body mass
//! - **Charts**: thirteen fixed charts; three of them are best-effort and
//!   are left out of the report when they cannot be drawn
//! - **Report**: fixed section layout with commentary per chart
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use penguin_report::{ReportConfig, ReportPipeline};
//!
//! let config = ReportConfig::builder()
//!     .output_dir("output")
//!     .report_path("penguins_analysis.md")
//!     .build()?;
//!
//! let summary = ReportPipeline::builder()
//!     .config(config)
//!     .build()?
//!     .run()?;
//!
//! println!("Report saved to: {}", summary.report_path.display());
//! ```
//!
//! # Custom Sources
//!
//! Anything implementing [`loader::DatasetSource`] can feed the pipeline:
//!
//! ```rust,ignore
//! use penguin_report::loader::LocalCsvSource;
//!
//! let summary = ReportPipeline::builder()
//!     .source(Box::new(LocalCsvSource::new("local", "my_penguins.csv")))
//!     .build()?
//!     .run()?;
//! ```

pub mod charts;
pub mod config;
pub mod crosstab;
pub mod error;
pub mod insights;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use charts::ChartGenerator;
pub use config::{ConfigValidationError, ReportConfig, ReportConfigBuilder};
pub use crosstab::{ContingencyTable, PivotTable};
pub use error::{ReportError, Result, ResultExt, SourceFailure};
pub use loader::{
    DatasetLoader, DatasetSource, EmbeddedCsvSource, LoadedDataset, LocalCsvSource,
    RemoteCsvSource,
};
pub use output::ensure_output;
pub use pipeline::{
    ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportPipeline,
    ReportPipelineBuilder, ReportStage,
};
pub use reporting::{MarkdownTable, ReportContent, ReportWriter};
pub use types::{ChartId, ChartOutcome, ChartRecord, RunSummary, SkippedChart};

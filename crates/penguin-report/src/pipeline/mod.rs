//! Report pipeline.
//!
//! [`ReportPipeline`] wires the stages together: output directory, dataset
//! loading, statistics, cross-tabulation, charts and the markdown document.
//! Progress can be observed through [`ProgressReporter`].

mod builder;
pub mod progress;

pub use builder::{ReportPipeline, ReportPipelineBuilder};
pub use progress::{ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportStage};

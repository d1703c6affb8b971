//! The report pipeline and its builder.

use crate::charts::ChartGenerator;
use crate::config::ReportConfig;
use crate::crosstab::{ContingencyTable, PivotTable};
use crate::error::Result;
use crate::loader::{DatasetLoader, DatasetSource};
use crate::output::ensure_output;
use crate::pipeline::progress::{
    ClosureProgressReporter, ProgressReporter, ProgressUpdate, ReportStage,
};
use crate::profiler::{describe_table, head_table, missing_summary};
use crate::reporting::{ReportContent, ReportWriter};
use crate::types::RunSummary;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Builds the analysis report end to end.
///
/// Use [`ReportPipeline::builder()`] to create one.
///
/// # Example
///
/// ```rust,ignore
/// use penguin_report::{ReportConfig, ReportPipeline};
///
/// let summary = ReportPipeline::builder()
///     .config(ReportConfig::builder().output_dir("charts").build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .run()?;
///
/// println!("Report saved to: {}", summary.report_path.display());
/// ```
pub struct ReportPipeline {
    config: ReportConfig,
    loader: DatasetLoader,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl ReportPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> ReportPipelineBuilder {
        ReportPipelineBuilder::default()
    }

    /// Configuration this pipeline runs with.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Dataset source names in fallback order.
    pub fn source_names(&self) -> Vec<&str> {
        self.loader.source_names()
    }

    /// Run every stage and write the report.
    ///
    /// Stages run strictly in order: output directory, dataset, statistics,
    /// cross-tabulation, charts, document. The document is only written when
    /// everything before it succeeded.
    ///
    /// # Errors
    ///
    /// The first error of any stage aborts the run. Best-effort charts that
    /// fail are not errors; they end up in [`RunSummary::skipped_charts`].
    pub fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();

        match self.run_internal() {
            Ok(summary) => {
                info!(
                    "Report finished in {} ms: {} charts, {} skipped",
                    start.elapsed().as_millis(),
                    summary.charts.len(),
                    summary.skipped_charts.len()
                );
                self.report(ProgressUpdate::complete(format!(
                    "Report saved to {}",
                    summary.report_path.display()
                )));
                Ok(summary)
            }
            Err(e) => {
                error!("Report generation failed: {}", e);
                self.report(ProgressUpdate::failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn run_internal(&self) -> Result<RunSummary> {
        let config = &self.config;

        self.stage(ReportStage::Preparing);
        let output_dir = ensure_output(&config.output_dir)?;

        self.stage(ReportStage::Loading);
        let dataset = self.loader.load()?;
        let df = &dataset.frame;
        info!(
            "Dataset ready: {} rows from '{}'",
            df.height(),
            dataset.source
        );

        self.stage(ReportStage::Statistics);
        let head = head_table(df, config.head_rows)?;
        let describe = describe_table(df)?;
        let missing = missing_summary(df);
        debug!("Missing values across all columns: {}", missing.total());

        self.stage(ReportStage::CrossTabulation);
        let contingency = ContingencyTable::compute(df)?;
        let pivot = PivotTable::compute(df)?;

        self.stage(ReportStage::Charts);
        let outcome = ChartGenerator::new(output_dir, config).generate_all(df, &contingency)?;

        self.stage(ReportStage::Writing);
        let content = ReportContent {
            head_rows: config.head_rows,
            head_table: head.to_markdown(),
            describe_table: describe.to_markdown(),
            charts: outcome.records.clone(),
            contingency_table: contingency.to_markdown(),
            pivot_table: pivot.to_markdown(),
            missing_table: missing.to_markdown(),
        };
        let report_path = ReportWriter::write(&config.report_path, &content)?;

        Ok(RunSummary {
            report_path,
            dataset_source: dataset.source,
            failed_sources: dataset.failed,
            rows: df.height(),
            charts: outcome.records,
            skipped_charts: outcome.skipped,
        })
    }

    fn stage(&self, stage: ReportStage) {
        info!("{}", stage.display_name());
        self.report(ProgressUpdate::new(stage, stage.display_name()));
    }

    fn report(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }
}

/// Builder for [`ReportPipeline`].
#[derive(Default)]
pub struct ReportPipelineBuilder {
    config: Option<ReportConfig>,
    sources: Vec<Box<dyn DatasetSource>>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl ReportPipelineBuilder {
    /// Set the configuration. Defaults to [`ReportConfig::default()`].
    pub fn config(mut self, config: ReportConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Add a dataset source.
    ///
    /// Once any source is added, the default bundled/packaged/remote chain
    /// from the configuration is not used; sources are tried in the order
    /// they were added.
    pub fn source(mut self, source: Box<dyn DatasetSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Receive progress updates through a custom reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Receive progress updates through a closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Validate the configuration and build the pipeline.
    ///
    /// # Errors
    ///
    /// [`crate::ReportError::InvalidConfig`] if the configuration does not validate.
    pub fn build(self) -> Result<ReportPipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let loader = if self.sources.is_empty() {
            DatasetLoader::from_config(&config)
        } else {
            DatasetLoader::new(self.sources)
        };

        Ok(ReportPipeline {
            config,
            loader,
            progress_reporter: self.progress_reporter,
        })
    }
}

//! Progress reporting for the report pipeline.
//!
//! A run walks through a fixed sequence of [`ReportStage`]s. Each stage owns a
//! slice of the overall progress range so callers can drive a progress bar
//! without knowing how the work is split.

use serde::Serialize;

/// Stages of a report run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStage {
    /// Validating configuration and preparing the output directory.
    Preparing,
    /// Reading the dataset from the first working source.
    Loading,
    /// Head, describe and missing-value tables.
    Statistics,
    /// Species × island counts and mean body mass.
    CrossTabulation,
    /// Rendering the chart files.
    Charts,
    /// Writing the markdown document.
    Writing,
    /// Run finished successfully.
    Complete,
    /// Run aborted with an error.
    Failed,
}

impl ReportStage {
    /// Human readable stage name.
    pub fn display_name(&self) -> &'static str {
        match self {
            ReportStage::Preparing => "Preparing output",
            ReportStage::Loading => "Loading dataset",
            ReportStage::Statistics => "Computing statistics",
            ReportStage::CrossTabulation => "Cross-tabulating",
            ReportStage::Charts => "Rendering charts",
            ReportStage::Writing => "Writing report",
            ReportStage::Complete => "Complete",
            ReportStage::Failed => "Failed",
        }
    }

    /// Share of the overall run spent in this stage.
    ///
    /// Chart rendering dominates; the weights of the working stages sum to 1.0.
    pub fn weight(&self) -> f32 {
        match self {
            ReportStage::Preparing => 0.02,
            ReportStage::Loading => 0.10,
            ReportStage::Statistics => 0.08,
            ReportStage::CrossTabulation => 0.05,
            ReportStage::Charts => 0.70,
            ReportStage::Writing => 0.05,
            ReportStage::Complete | ReportStage::Failed => 0.0,
        }
    }

    /// Overall progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            ReportStage::Preparing => 0.0,
            ReportStage::Loading => 0.02,
            ReportStage::Statistics => 0.12,
            ReportStage::CrossTabulation => 0.20,
            ReportStage::Charts => 0.25,
            ReportStage::Writing => 0.95,
            ReportStage::Complete => 1.0,
            ReportStage::Failed => 0.0,
        }
    }
}

/// A single progress notification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressUpdate {
    /// Stage the run is in.
    pub stage: ReportStage,
    /// Overall progress, 0.0 to 1.0.
    pub progress: f32,
    /// What is happening right now.
    pub message: String,
}

impl ProgressUpdate {
    /// Update marking the start of `stage`.
    pub fn new(stage: ReportStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: stage.base_progress().clamp(0.0, 1.0),
            message: message.into(),
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(ReportStage::Complete, message)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(ReportStage::Failed, message)
    }
}

/// Receives progress updates while a report is being built.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, update: ProgressUpdate);
}

/// [`ProgressReporter`] backed by a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    const WORKING_STAGES: [ReportStage; 6] = [
        ReportStage::Preparing,
        ReportStage::Loading,
        ReportStage::Statistics,
        ReportStage::CrossTabulation,
        ReportStage::Charts,
        ReportStage::Writing,
    ];

    #[test]
    fn test_weights_sum_to_one() {
        let total: f32 = WORKING_STAGES.iter().map(|s| s.weight()).sum();
        assert!((total - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_base_progress_is_cumulative() {
        let mut expected = 0.0;
        for stage in WORKING_STAGES {
            assert!((stage.base_progress() - expected).abs() < 1e-6, "{stage:?}");
            expected += stage.weight();
        }
        assert!((ReportStage::Complete.base_progress() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_update_constructors() {
        let update = ProgressUpdate::new(ReportStage::Charts, "Rendering");
        assert_eq!(update.stage, ReportStage::Charts);
        assert!((update.progress - 0.25).abs() < 1e-6);

        assert_eq!(ProgressUpdate::complete("done").progress, 1.0);
        assert_eq!(ProgressUpdate::failed("boom").stage, ReportStage::Failed);
    }

    #[test]
    fn test_closure_reporter_forwards_updates() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let reporter = ClosureProgressReporter::new(move |update: ProgressUpdate| {
            sink.lock().unwrap().push(update.stage);
        });

        reporter.report(ProgressUpdate::new(ReportStage::Loading, "x"));
        reporter.report(ProgressUpdate::complete("y"));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![ReportStage::Loading, ReportStage::Complete]
        );
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let json = serde_json::to_string(&ReportStage::CrossTabulation).unwrap();
        assert_eq!(json, "\"cross_tabulation\"");
    }
}

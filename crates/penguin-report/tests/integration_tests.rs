//! Integration tests for the report pipeline.
//!
//! These tests run the whole pipeline against stub dataset sources and a
//! small CSV fixture, writing into temporary directories.

use penguin_report::insights::insight;
use penguin_report::loader::DatasetLoader;
use penguin_report::profiler::missing_summary;
use penguin_report::{
    ChartGenerator, ChartId, ContingencyTable, DatasetSource, LocalCsvSource, ReportConfig,
    ReportContent, ReportError, ReportPipeline, ReportWriter, Result, RunSummary, ensure_output,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn sample_csv() -> PathBuf {
    fixtures_path().join("penguins_sample.csv")
}

/// Source returning a fixed frame.
struct FrameSource {
    name: &'static str,
    frame: DataFrame,
}

impl DatasetSource for FrameSource {
    fn name(&self) -> &str {
        self.name
    }

    fn load(&self) -> Result<DataFrame> {
        Ok(self.frame.clone())
    }
}

/// Source that always fails and counts how often it was asked.
struct OfflineSource {
    name: &'static str,
    calls: Arc<AtomicUsize>,
}

impl DatasetSource for OfflineSource {
    fn name(&self) -> &str {
        self.name
    }

    fn load(&self) -> Result<DataFrame> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ReportError::SourceUnavailable {
            source_name: self.name.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

fn config_in(dir: &Path) -> ReportConfig {
    ReportConfig::builder()
        .output_dir(dir.join("output"))
        .report_path(dir.join("penguins_analysis.md"))
        .build()
        .unwrap()
}

fn three_rows() -> DataFrame {
    df!(
        "species" => &["A", "B", "A"],
        "island" => &["X", "Y", "Y"],
        "bill_length_mm" => &[Some(39.1), Some(46.1), Some(40.3)],
        "bill_depth_mm" => &[Some(18.7), Some(13.2), Some(18.0)],
        "flipper_length_mm" => &[Some(181.0), Some(211.0), Some(195.0)],
        "body_mass_g" => &[Some(3000.0), Some(4000.0), None],
        "sex" => &[Some("male"), Some("female"), None]
    )
    .unwrap()
}

fn run_with(dir: &Path, frame: DataFrame) -> RunSummary {
    ReportPipeline::builder()
        .config(config_in(dir))
        .source(Box::new(FrameSource {
            name: "stub",
            frame,
        }))
        .build()
        .unwrap()
        .run()
        .unwrap()
}

/// Body of the section starting at `heading`, up to the next heading.
fn section<'a>(doc: &'a str, heading: &str) -> &'a str {
    let start = doc
        .find(heading)
        .unwrap_or_else(|| panic!("missing section '{heading}'"))
        + heading.len();
    let rest = &doc[start..];
    let end = rest.find("\n#").unwrap_or(rest.len());
    &rest[..end]
}

/// Data rows of a pipe table (header and alignment row skipped).
fn table_rows(block: &str) -> Vec<Vec<String>> {
    block
        .lines()
        .filter(|line| line.starts_with('|'))
        .skip(2)
        .map(|line| {
            line.trim_matches('|')
                .split('|')
                .map(|cell| cell.trim().to_string())
                .collect()
        })
        .collect()
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_end_to_end_three_rows() {
    let tmp = tempfile::tempdir().unwrap();
    let summary = run_with(tmp.path(), three_rows());

    assert_eq!(summary.rows, 3);
    assert_eq!(summary.dataset_source, "stub");
    assert!(summary.failed_sources.is_empty());

    let doc = fs::read_to_string(&summary.report_path).unwrap();
    assert!(doc.contains("### 상위 10행"));

    let missing = table_rows(section(&doc, "### 결측치 요약"));
    let body_mass = missing
        .iter()
        .find(|row| row[0] == "body_mass_g")
        .expect("body_mass_g row");
    assert_eq!(body_mass[1], "1");

    let crosstab = table_rows(section(&doc, "### 종(species) vs 섬(island) 교차표"));
    let total: usize = crosstab
        .iter()
        .flat_map(|row| row[1..].iter().map(|cell| cell.parse::<usize>().unwrap()))
        .sum();
    assert_eq!(total, 3);
}

#[test]
fn test_every_record_path_exists_and_is_linked() {
    let tmp = tempfile::tempdir().unwrap();
    let summary = run_with(tmp.path(), three_rows());
    let doc = fs::read_to_string(&summary.report_path).unwrap();

    assert!(!summary.charts.is_empty());
    for record in &summary.charts {
        assert!(record.path.is_file(), "{} missing", record.path.display());
        assert!(doc.contains(&format!("![]({})", record.path.display())));
        assert!(doc.contains(&format!("### {}\n", record.title)));
    }
}

#[test]
fn test_skipped_charts_are_left_out_of_document() {
    let tmp = tempfile::tempdir().unwrap();
    let mut frame = three_rows();
    frame
        .with_column(Series::new("bill_depth_mm".into(), &[None::<f64>, None, None]))
        .unwrap();

    let summary = run_with(tmp.path(), frame);
    let doc = fs::read_to_string(&summary.report_path).unwrap();

    let skipped: Vec<ChartId> = summary.skipped_charts.iter().map(|s| s.id).collect();
    assert!(skipped.contains(&ChartId::Pairplot));
    assert!(skipped.contains(&ChartId::SwarmBillDepth));
    for chart in &summary.skipped_charts {
        assert!(chart.id.is_best_effort());
        assert!(!doc.contains(&format!("### {}\n", chart.title)));
        assert!(!summary.charts.iter().any(|r| r.id == chart.id));
    }
    assert!(doc.contains("### 결측치 요약"));
}

#[test]
fn test_skipped_stacked_chart_is_left_out_of_document() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    let frame = three_rows();

    // no species x island counts, so the stacked chart has nothing to draw
    let output_dir = ensure_output(&config.output_dir).unwrap();
    let outcome = ChartGenerator::new(output_dir, &config)
        .generate_all(&frame, &ContingencyTable::default())
        .unwrap();
    let skipped: Vec<ChartId> = outcome.skipped.iter().map(|s| s.id).collect();
    assert!(skipped.contains(&ChartId::StackedSpeciesIsland));

    let content = ReportContent {
        head_rows: config.head_rows,
        head_table: String::new(),
        describe_table: String::new(),
        charts: outcome.records.clone(),
        contingency_table: ContingencyTable::default().to_markdown(),
        pivot_table: String::new(),
        missing_table: missing_summary(&frame).to_markdown(),
    };
    let path = ReportWriter::write(&config.report_path, &content).unwrap();
    let doc = fs::read_to_string(path).unwrap();

    let stacked = ChartId::StackedSpeciesIsland;
    assert!(!doc.contains(stacked.title()));
    assert!(!doc.contains(&format!("{}.svg", stacked.file_stem())));
    if let Some(text) = insight(stacked) {
        assert!(!doc.contains(text));
    }
    assert_eq!(outcome.records.len(), ChartId::ALL.len() - skipped.len());
    for record in &outcome.records {
        assert!(doc.contains(&format!("### {}\n", record.title)));
    }
    assert!(doc.contains("### 종(species) vs 섬(island) 교차표"));
}

#[test]
fn test_rerun_overwrites_outputs() {
    let tmp = tempfile::tempdir().unwrap();
    let first = run_with(tmp.path(), three_rows());
    fs::write(&first.report_path, "stale").unwrap();

    let second = run_with(tmp.path(), three_rows());
    assert_eq!(first.report_path, second.report_path);
    let doc = fs::read_to_string(&second.report_path).unwrap();
    assert!(doc.starts_with("# Penguins dataset"));
}

// ============================================================================
// Source fallback
// ============================================================================

#[test]
fn test_all_sources_failing_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    let report_path = config.report_path.clone();
    let calls = Arc::new(AtomicUsize::new(0));

    let mut builder = ReportPipeline::builder().config(config);
    for name in ["bundled", "packaged", "remote"] {
        builder = builder.source(Box::new(OfflineSource {
            name,
            calls: Arc::clone(&calls),
        }));
    }
    let error = builder.build().unwrap().run().unwrap_err();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    match error {
        ReportError::AllSourcesFailed(failures) => {
            let names: Vec<&str> = failures.iter().map(|f| f.source.as_str()).collect();
            assert_eq!(names, vec!["bundled", "packaged", "remote"]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!report_path.exists());
}

#[test]
fn test_falls_back_to_fixture_file() {
    let tmp = tempfile::tempdir().unwrap();
    let summary = ReportPipeline::builder()
        .config(config_in(tmp.path()))
        .source(Box::new(LocalCsvSource::new(
            "bundled",
            tmp.path().join("does_not_exist.csv"),
        )))
        .source(Box::new(LocalCsvSource::new("fixture", sample_csv())))
        .build()
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.dataset_source, "fixture");
    assert_eq!(summary.rows, 20);
    assert_eq!(summary.failed_sources.len(), 1);
    assert_eq!(summary.failed_sources[0].source, "bundled");
    assert!(summary.report_path.is_file());
}

#[test]
fn test_fixture_normalizes_to_schema() {
    let loader = DatasetLoader::new(vec![Box::new(LocalCsvSource::new("fixture", sample_csv()))]);
    let dataset = loader.load().unwrap();
    let df = &dataset.frame;

    let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "species",
            "island",
            "bill_length_mm",
            "bill_depth_mm",
            "flipper_length_mm",
            "body_mass_g",
            "sex"
        ]
    );
    assert_eq!(df.column("body_mass_g").unwrap().dtype(), &DataType::Float64);

    let missing = missing_summary(df);
    assert_eq!(missing.count("body_mass_g"), Some(1));
    assert_eq!(missing.count("sex"), Some(2));
    for (_, count) in &missing.counts {
        assert!(*count <= df.height());
    }
}

#[test]
fn test_summary_serializes_to_json() {
    let tmp = tempfile::tempdir().unwrap();
    let summary = run_with(tmp.path(), three_rows());

    let json: serde_json::Value = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["rows"], 3);
    assert_eq!(json["dataset_source"], "stub");
    assert!(json["charts"].as_array().unwrap().len() >= 10);
}

//! Chart generation.
//!
//! [`ChartGenerator`] renders the fixed chart set in [`ChartId::ALL`] order,
//! one SVG file per chart under the output directory. Each chart gets its own
//! drawing surface (see [`figure::render_figure`]) that is closed before the
//! next one is opened.
//!
//! Charts flagged [`ChartId::is_best_effort`] may fail without stopping the
//! run: the failure is logged, recorded as a [`SkippedChart`] and the chart
//! is left out of the report. Any other failure aborts generation.
//!
//! # Example
//!
//! ```rust,ignore
//! use penguin_report::charts::ChartGenerator;
//! use penguin_report::crosstab::ContingencyTable;
//!
//! let generator = ChartGenerator::new("output", &config);
//! let contingency = ContingencyTable::compute(&df)?;
//! let outcome = generator.generate_all(&df, &contingency)?;
//! for record in &outcome.records {
//!     println!("{} -> {}", record.title, record.path.display());
//! }
//! ```

pub mod categorical;
pub mod density;
pub mod distribution;
pub mod figure;
pub mod matrix;
pub mod relational;

use crate::config::ReportConfig;
use crate::crosstab::ContingencyTable;
use crate::error::{ReportError, Result};
use crate::profiler::correlation_matrix;
use crate::types::{
    BILL_DEPTH, BILL_LENGTH, BODY_MASS, ChartId, ChartOutcome, ChartRecord, FLIPPER_LENGTH,
    ISLAND, NUMERIC_COLUMNS, SEX, SPECIES, SkippedChart,
};
use crate::utils::{
    category_values, group_by_category, numeric_values, present_values, value_counts_in_order,
};
use figure::{Canvas, figure_pixels, render_figure};
use polars::prelude::DataFrame;
use relational::PairData;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// File extension of rendered charts.
pub const IMAGE_EXTENSION: &str = "svg";

/// Renders every chart of the report into an output directory.
#[derive(Debug, Clone)]
pub struct ChartGenerator {
    output_dir: PathBuf,
    dpi: u32,
    jitter_seed: u64,
}

impl ChartGenerator {
    /// Create a generator writing into `output_dir`, taking resolution and
    /// jitter seed from `config`.
    pub fn new(output_dir: impl Into<PathBuf>, config: &ReportConfig) -> Self {
        Self {
            output_dir: output_dir.into(),
            dpi: config.dpi,
            jitter_seed: config.jitter_seed,
        }
    }

    /// Where the image for `id` is written.
    pub fn chart_path(&self, id: ChartId) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", id.file_stem(), IMAGE_EXTENSION))
    }

    /// Render every chart in order.
    ///
    /// # Errors
    ///
    /// [`ReportError::ChartFailed`] for the first chart that fails and is not
    /// best-effort. Best-effort failures end up in [`ChartOutcome::skipped`].
    pub fn generate_all(&self, df: &DataFrame, contingency: &ContingencyTable) -> Result<ChartOutcome> {
        info!("Rendering {} charts into {}", ChartId::ALL.len(), self.output_dir.display());
        let mut outcome = ChartOutcome::default();

        for id in ChartId::ALL {
            match self.generate(id, df, contingency) {
                Ok(record) => {
                    debug!("Saved '{}' to {}", record.title, record.path.display());
                    outcome.records.push(record);
                }
                Err(e) if id.is_best_effort() => {
                    warn!("Skipping chart '{}': {}", id.title(), e);
                    outcome.skipped.push(SkippedChart {
                        id,
                        title: id.title().to_string(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => {
                    return Err(ReportError::ChartFailed {
                        chart: id.title().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        info!(
            "Rendered {} charts, skipped {}",
            outcome.records.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }

    /// Render a single chart and return its record.
    pub fn generate(&self, id: ChartId, df: &DataFrame, contingency: &ContingencyTable) -> Result<ChartRecord> {
        let path = self.chart_path(id);
        let size = figure_pixels(id.figure_inches(), self.dpi);

        render_figure(&path, size, |canvas| self.draw(id, canvas, df, contingency))?;

        Ok(ChartRecord {
            id,
            title: id.title().to_string(),
            path,
        })
    }

    fn draw(&self, id: ChartId, canvas: &Canvas<'_>, df: &DataFrame, contingency: &ContingencyTable) -> Result<()> {
        let title = id.title();
        match id {
            ChartId::ScatterBill => {
                let groups = relational::group_points(
                    &category_values(df, SPECIES)?,
                    &numeric_values(df, BILL_LENGTH)?,
                    &numeric_values(df, BILL_DEPTH)?,
                );
                relational::draw_scatter(canvas, title, &groups, BILL_LENGTH, BILL_DEPTH)
            }
            ChartId::Pairplot => {
                let values = NUMERIC_COLUMNS
                    .iter()
                    .map(|c| numeric_values(df, c))
                    .collect::<Result<Vec<_>>>()?;
                let data = PairData::complete_rows(&NUMERIC_COLUMNS, &category_values(df, SPECIES)?, &values)?;
                relational::draw_pairplot(canvas, title, &data)
            }
            ChartId::HistBodyMass => {
                let values = present_values(&numeric_values(df, BODY_MASS)?);
                distribution::draw_histogram(canvas, title, &values, BODY_MASS)
            }
            ChartId::KdeBodyMass => {
                let groups = self.species_groups(df, BODY_MASS)?;
                distribution::draw_kde(canvas, title, &groups, BODY_MASS)
            }
            ChartId::BoxBodyMass => {
                let groups = self.species_groups(df, BODY_MASS)?;
                categorical::draw_box(canvas, title, &groups, SPECIES, BODY_MASS)
            }
            ChartId::ViolinFlipper => {
                let groups = self.species_groups(df, FLIPPER_LENGTH)?;
                categorical::draw_violin(canvas, title, &groups, SPECIES, FLIPPER_LENGTH)
            }
            ChartId::StripBillLength => {
                let groups = self.species_groups(df, BILL_LENGTH)?;
                categorical::draw_strip(canvas, title, &groups, SPECIES, BILL_LENGTH, self.jitter_seed)
            }
            ChartId::SwarmBillDepth => {
                // species without any bill depth drop out entirely
                let groups: Vec<_> = self
                    .species_groups(df, BILL_DEPTH)?
                    .into_iter()
                    .filter(|(_, values)| !values.is_empty())
                    .collect();
                categorical::draw_swarm(canvas, title, &groups, SPECIES, BILL_DEPTH)
            }
            ChartId::CorrelationHeatmap => {
                let matrix = correlation_matrix(df, &NUMERIC_COLUMNS)?;
                matrix::draw_heatmap(canvas, title, &matrix)
            }
            ChartId::CountSpecies => {
                let counts = value_counts_in_order(&category_values(df, SPECIES)?, false);
                categorical::draw_counts(canvas, title, &counts, SPECIES)
            }
            ChartId::CountIsland => {
                let counts = value_counts_in_order(&category_values(df, ISLAND)?, false);
                categorical::draw_counts(canvas, title, &counts, ISLAND)
            }
            ChartId::CountSex => {
                let counts = value_counts_in_order(&category_values(df, SEX)?, true);
                categorical::draw_counts(canvas, title, &counts, SEX)
            }
            ChartId::StackedSpeciesIsland => matrix::draw_stacked_percent(canvas, title, contingency),
        }
    }

    fn species_groups(&self, df: &DataFrame, column: &str) -> Result<Vec<(String, Vec<f64>)>> {
        Ok(group_by_category(
            &category_values(df, SPECIES)?,
            &numeric_values(df, column)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SCHEMA_COLUMNS;
    use polars::prelude::*;

    fn sample() -> DataFrame {
        df!(
            "species" => &["Adelie", "Adelie", "Adelie", "Gentoo", "Gentoo", "Gentoo", "Chinstrap", "Chinstrap"],
            "island" => &["Torgersen", "Dream", "Biscoe", "Biscoe", "Biscoe", "Biscoe", "Dream", "Dream"],
            "bill_length_mm" => &[Some(39.1), Some(39.5), Some(40.3), Some(46.1), Some(50.0), Some(48.7), Some(46.5), Some(50.0)],
            "bill_depth_mm" => &[Some(18.7), Some(17.4), Some(18.0), Some(13.2), Some(16.3), Some(14.1), Some(17.9), Some(19.5)],
            "flipper_length_mm" => &[Some(181.0), Some(186.0), Some(195.0), Some(211.0), Some(230.0), Some(210.0), Some(192.0), Some(196.0)],
            "body_mass_g" => &[Some(3750.0), Some(3800.0), Some(3250.0), Some(4500.0), Some(5700.0), Some(4450.0), Some(3500.0), Some(3900.0)],
            "sex" => &[Some("male"), Some("female"), None, Some("female"), Some("male"), Some("female"), Some("female"), Some("male")]
        )
        .unwrap()
    }

    fn empty_frame() -> DataFrame {
        let columns: Vec<Column> = SCHEMA_COLUMNS
            .iter()
            .map(|name| {
                let dtype = if crate::types::is_numeric_column(name) {
                    DataType::Float64
                } else {
                    DataType::String
                };
                Column::new_empty((*name).into(), &dtype)
            })
            .collect();
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn test_chart_path_uses_stem() {
        let generator = ChartGenerator::new("out", &ReportConfig::default());
        assert_eq!(
            generator.chart_path(ChartId::CorrelationHeatmap),
            PathBuf::from("out/heatmap_corr.svg")
        );
    }

    #[test]
    fn test_generate_all_renders_every_chart() {
        let tmp = tempfile::tempdir().unwrap();
        let df = sample();
        let contingency = ContingencyTable::compute(&df).unwrap();
        let generator = ChartGenerator::new(tmp.path(), &ReportConfig::default());

        let outcome = generator.generate_all(&df, &contingency).unwrap();

        assert_eq!(outcome.records.len(), ChartId::ALL.len());
        assert!(outcome.skipped.is_empty());
        for (record, id) in outcome.records.iter().zip(ChartId::ALL) {
            assert_eq!(record.id, id);
            assert!(record.path.is_file(), "{} missing", record.path.display());
        }
    }

    #[test]
    fn test_best_effort_charts_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let generator = ChartGenerator::new(tmp.path(), &ReportConfig::default());

        let outcome = generator
            .generate_all(&empty_frame(), &ContingencyTable::default())
            .unwrap();

        let skipped: Vec<ChartId> = outcome.skipped.iter().map(|s| s.id).collect();
        assert_eq!(
            skipped,
            vec![ChartId::Pairplot, ChartId::SwarmBillDepth, ChartId::StackedSpeciesIsland]
        );
        assert_eq!(outcome.records.len(), 10);
        for id in skipped {
            assert!(!outcome.contains(id));
            assert!(!generator.chart_path(id).exists());
        }
        assert!(outcome.records.iter().all(|r| r.path.is_file()));
    }

    #[test]
    fn test_required_chart_failure_aborts() {
        let tmp = tempfile::tempdir().unwrap();
        let generator = ChartGenerator::new(tmp.path(), &ReportConfig::default());
        let df = sample().drop(BILL_LENGTH).unwrap();

        let error = generator
            .generate_all(&df, &ContingencyTable::default())
            .unwrap_err();
        assert!(matches!(error, ReportError::ChartFailed { ref chart, .. } if chart == ChartId::ScatterBill.title()));
    }

    #[test]
    fn test_strip_output_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        let df = sample();
        let contingency = ContingencyTable::compute(&df).unwrap();
        let generator = ChartGenerator::new(tmp.path(), &ReportConfig::default());

        let first = generator.generate(ChartId::StripBillLength, &df, &contingency).unwrap();
        let a = std::fs::read_to_string(&first.path).unwrap();
        let second = generator.generate(ChartId::StripBillLength, &df, &contingency).unwrap();
        let b = std::fs::read_to_string(&second.path).unwrap();
        assert_eq!(a, b);
    }
}

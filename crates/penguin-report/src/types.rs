use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::SourceFailure;

// ============================================================================
// Observation table schema
// ============================================================================

pub const SPECIES: &str = "species";
pub const ISLAND: &str = "island";
pub const BILL_LENGTH: &str = "bill_length_mm";
pub const BILL_DEPTH: &str = "bill_depth_mm";
pub const FLIPPER_LENGTH: &str = "flipper_length_mm";
pub const BODY_MASS: &str = "body_mass_g";
pub const SEX: &str = "sex";

/// All columns of the observation table, in table order.
pub const SCHEMA_COLUMNS: [&str; 7] = [
    SPECIES,
    ISLAND,
    BILL_LENGTH,
    BILL_DEPTH,
    FLIPPER_LENGTH,
    BODY_MASS,
    SEX,
];

/// Numeric measurement columns, in table order.
pub const NUMERIC_COLUMNS: [&str; 4] = [BILL_LENGTH, BILL_DEPTH, FLIPPER_LENGTH, BODY_MASS];

/// Categorical columns, in table order.
pub const CATEGORICAL_COLUMNS: [&str; 3] = [SPECIES, ISLAND, SEX];

/// Label used wherever a missing category value needs its own bucket.
pub const MISSING_LABEL: &str = "NaN";

/// Returns true if `name` is one of the numeric measurement columns.
pub fn is_numeric_column(name: &str) -> bool {
    NUMERIC_COLUMNS.contains(&name)
}

// ============================================================================
// Charts
// ============================================================================

/// Stable identifier for each chart in the report.
///
/// The display title may change; the id is what the insight catalog and
/// the output file name are keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    ScatterBill,
    Pairplot,
    HistBodyMass,
    KdeBodyMass,
    BoxBodyMass,
    ViolinFlipper,
    StripBillLength,
    SwarmBillDepth,
    CorrelationHeatmap,
    CountSpecies,
    CountIsland,
    CountSex,
    StackedSpeciesIsland,
}

impl ChartId {
    /// Every chart, in rendering order.
    pub const ALL: [ChartId; 13] = [
        ChartId::ScatterBill,
        ChartId::Pairplot,
        ChartId::HistBodyMass,
        ChartId::KdeBodyMass,
        ChartId::BoxBodyMass,
        ChartId::ViolinFlipper,
        ChartId::StripBillLength,
        ChartId::SwarmBillDepth,
        ChartId::CorrelationHeatmap,
        ChartId::CountSpecies,
        ChartId::CountIsland,
        ChartId::CountSex,
        ChartId::StackedSpeciesIsland,
    ];

    /// Title shown on the chart and as the report subsection heading.
    pub fn title(self) -> &'static str {
        match self {
            ChartId::ScatterBill => "Bill length vs Bill depth by Species",
            ChartId::Pairplot => "Pairplot (numeric)",
            ChartId::HistBodyMass => "Histogram of body_mass_g",
            ChartId::KdeBodyMass => "KDE of body_mass_g by Species",
            ChartId::BoxBodyMass => "Body mass by Species (boxplot)",
            ChartId::ViolinFlipper => "Flipper length by Species (violin)",
            ChartId::StripBillLength => "Bill length by Species (stripplot)",
            ChartId::SwarmBillDepth => "Bill depth by Species (swarmplot)",
            ChartId::CorrelationHeatmap => "Correlation heatmap (numeric features)",
            ChartId::CountSpecies => "Counts per Species",
            ChartId::CountIsland => "Counts per Island",
            ChartId::CountSex => "Counts per Sex",
            ChartId::StackedSpeciesIsland => "Stacked (percent) species by island",
        }
    }

    /// File name (without extension) of the rendered image.
    pub fn file_stem(self) -> &'static str {
        match self {
            ChartId::ScatterBill => "scatter_bill",
            ChartId::Pairplot => "pairplot",
            ChartId::HistBodyMass => "hist_body_mass",
            ChartId::KdeBodyMass => "kde_body_mass",
            ChartId::BoxBodyMass => "boxplot_body_mass_species",
            ChartId::ViolinFlipper => "violin_flipper_species",
            ChartId::StripBillLength => "strip_bill_length",
            ChartId::SwarmBillDepth => "swarm_bill_depth",
            ChartId::CorrelationHeatmap => "heatmap_corr",
            ChartId::CountSpecies => "bar_species_counts",
            ChartId::CountIsland => "bar_island_counts",
            ChartId::CountSex => "bar_sex_counts",
            ChartId::StackedSpeciesIsland => "stacked_species_island",
        }
    }

    /// Figure size in inches (width, height).
    pub fn figure_inches(self) -> (f64, f64) {
        match self {
            ChartId::Pairplot => (10.0, 10.0),
            ChartId::CorrelationHeatmap => (6.0, 5.0),
            ChartId::StackedSpeciesIsland => (6.0, 4.0),
            _ => (6.4, 4.8),
        }
    }

    /// Best-effort charts are omitted from the report when they fail
    /// instead of aborting the run.
    pub fn is_best_effort(self) -> bool {
        matches!(
            self,
            ChartId::Pairplot | ChartId::SwarmBillDepth | ChartId::StackedSpeciesIsland
        )
    }
}

/// A chart that was rendered and saved successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub id: ChartId,
    pub title: String,
    pub path: PathBuf,
}

/// A best-effort chart that failed and was left out of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedChart {
    pub id: ChartId,
    pub title: String,
    pub reason: String,
}

/// Everything the chart stage produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartOutcome {
    /// Rendered charts, in rendering order.
    pub records: Vec<ChartRecord>,
    /// Best-effort charts that failed.
    pub skipped: Vec<SkippedChart>,
}

impl ChartOutcome {
    /// Returns true if the chart was rendered.
    pub fn contains(&self, id: ChartId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }
}

// ============================================================================
// Run summary
// ============================================================================

/// Machine-readable summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Where the markdown document was written.
    pub report_path: PathBuf,
    /// Name of the dataset source that provided the data.
    pub dataset_source: String,
    /// Sources tried before the successful one.
    pub failed_sources: Vec<SourceFailure>,
    /// Number of observations.
    pub rows: usize,
    /// Rendered charts, in report order.
    pub charts: Vec<ChartRecord>,
    /// Best-effort charts left out of the report.
    pub skipped_charts: Vec<SkippedChart>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_chart_ids_are_unique_and_ordered() {
        let stems: HashSet<_> = ChartId::ALL.iter().map(|id| id.file_stem()).collect();
        let titles: HashSet<_> = ChartId::ALL.iter().map(|id| id.title()).collect();
        assert_eq!(stems.len(), 13);
        assert_eq!(titles.len(), 13);
        assert_eq!(ChartId::ALL[0], ChartId::ScatterBill);
        assert_eq!(ChartId::ALL[12], ChartId::StackedSpeciesIsland);
    }

    #[test]
    fn test_best_effort_charts() {
        let best_effort: Vec<_> = ChartId::ALL
            .iter()
            .copied()
            .filter(|id| id.is_best_effort())
            .collect();
        assert_eq!(
            best_effort,
            vec![
                ChartId::Pairplot,
                ChartId::SwarmBillDepth,
                ChartId::StackedSpeciesIsland
            ]
        );
    }

    #[test]
    fn test_schema_partitions() {
        for column in SCHEMA_COLUMNS {
            let numeric = is_numeric_column(column);
            let categorical = CATEGORICAL_COLUMNS.contains(&column);
            assert!(numeric ^ categorical, "{column} must be exactly one kind");
        }
    }

    #[test]
    fn test_chart_id_serialization() {
        let json = serde_json::to_string(&ChartId::SwarmBillDepth).unwrap();
        assert_eq!(json, "\"swarm_bill_depth\"");
    }
}

use crate::error::{Result, ResultExt};
use crate::insights::insight;
use crate::types::ChartRecord;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Last line of every report.
pub const REPORT_FOOTER: &str = "Generated by penguin-report";

// ============================================================================
// Report content
// ============================================================================

/// Everything the report needs, already rendered as markdown fragments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReportContent {
    /// Number of rows in the head table, used in its heading.
    pub head_rows: usize,
    /// First rows of the dataset.
    pub head_table: String,
    /// Describe table.
    pub describe_table: String,
    /// Rendered charts, in display order.
    pub charts: Vec<ChartRecord>,
    /// Species × island counts.
    pub contingency_table: String,
    /// Species × island mean body mass.
    pub pivot_table: String,
    /// Per-column missing counts.
    pub missing_table: String,
}

// ============================================================================
// Writer
// ============================================================================

/// Assembles and writes the markdown report.
pub struct ReportWriter;

impl ReportWriter {
    /// Render the whole document.
    ///
    /// Sections always appear in the same order; each chart gets a heading,
    /// an image link and its commentary when the catalog has one.
    pub fn render(content: &ReportContent) -> String {
        let mut doc = String::new();

        doc.push_str("# Penguins dataset 분석 보고서\n\n");
        doc.push_str("## 데이터 요약\n\n");
        let _ = write!(doc, "### 상위 {}행\n\n", content.head_rows);
        push_block(&mut doc, &content.head_table);
        doc.push_str("### 기술 통계\n\n");
        push_block(&mut doc, &content.describe_table);

        doc.push_str("## 시각화\n\n");
        for record in &content.charts {
            let _ = write!(doc, "### {}\n\n", record.title);
            let _ = write!(doc, "![]({})\n\n", record.path.display());
            if let Some(text) = insight(record.id) {
                doc.push_str("**인사이트:**\n\n");
                push_block(&mut doc, text);
            }
        }

        doc.push_str("## 막대그래프 관련 교차표 및 피벗테이블\n\n");
        doc.push_str("### 종(species) vs 섬(island) 교차표\n\n");
        push_block(&mut doc, &content.contingency_table);
        doc.push_str("### 종별-섬별 평균 body_mass_g 피벗테이블\n\n");
        push_block(&mut doc, &content.pivot_table);

        doc.push_str("## 추가 통계\n\n");
        doc.push_str("### 결측치 요약\n\n");
        push_block(&mut doc, &content.missing_table);

        doc.push_str("---\n\n");
        doc.push_str(REPORT_FOOTER);
        doc.push('\n');
        doc
    }

    /// Render and write the document to `path`, replacing any existing file.
    pub fn write(path: impl AsRef<Path>, content: &ReportContent) -> Result<PathBuf> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .context(format!("Creating report directory '{}'", parent.display()))?;
        }

        let document = Self::render(content);
        fs::write(path, document).context(format!("Writing report '{}'", path.display()))?;

        info!("Report saved: {}", path.display());
        Ok(path.to_path_buf())
    }
}

fn push_block(doc: &mut String, block: &str) {
    doc.push_str(block);
    doc.push_str("\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChartId;
    use pretty_assertions::assert_eq;

    fn content() -> ReportContent {
        ReportContent {
            head_rows: 10,
            head_table: "HEAD".to_string(),
            describe_table: "DESCRIBE".to_string(),
            charts: vec![ChartRecord {
                id: ChartId::CountSex,
                title: ChartId::CountSex.title().to_string(),
                path: PathBuf::from("output/bar_sex_counts.svg"),
            }],
            contingency_table: "CROSSTAB".to_string(),
            pivot_table: "PIVOT".to_string(),
            missing_table: "MISSING".to_string(),
        }
    }

    #[test]
    fn test_sections_in_order() {
        let doc = ReportWriter::render(&content());
        let markers = [
            "# Penguins dataset 분석 보고서",
            "## 데이터 요약",
            "### 상위 10행",
            "HEAD",
            "### 기술 통계",
            "DESCRIBE",
            "## 시각화",
            "### Counts per Sex",
            "![](output/bar_sex_counts.svg)",
            "**인사이트:**",
            "## 막대그래프 관련 교차표 및 피벗테이블",
            "### 종(species) vs 섬(island) 교차표",
            "CROSSTAB",
            "### 종별-섬별 평균 body_mass_g 피벗테이블",
            "PIVOT",
            "## 추가 통계",
            "### 결측치 요약",
            "MISSING",
            "---",
            REPORT_FOOTER,
        ];

        let mut cursor = 0;
        for marker in markers {
            let found = doc[cursor..]
                .find(marker)
                .unwrap_or_else(|| panic!("'{marker}' missing or out of order"));
            cursor += found + marker.len();
        }
        assert!(doc.ends_with("Generated by penguin-report\n"));
    }

    #[test]
    fn test_chart_block_layout() {
        let doc = ReportWriter::render(&content());
        let start = doc.find("### Counts per Sex").unwrap();
        let block = &doc[start..];
        let expected_prefix = "### Counts per Sex\n\n![](output/bar_sex_counts.svg)\n\n**인사이트:**\n\n성별 분포는";
        assert_eq!(&block[..expected_prefix.len()], expected_prefix);
    }

    #[test]
    fn test_no_charts_still_renders_sections() {
        let mut content = content();
        content.charts.clear();
        let doc = ReportWriter::render(&content);
        assert!(doc.contains("## 시각화\n\n## 막대그래프"));
        assert!(!doc.contains("**인사이트:**"));
    }

    #[test]
    fn test_write_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("reports").join("penguins_analysis.md");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "stale").unwrap();

        let written = ReportWriter::write(&path, &content()).unwrap();
        assert_eq!(written, path);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Penguins dataset"));
        assert!(!text.contains("stale"));
    }
}

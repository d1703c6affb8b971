//! Pipe-style markdown tables.
//!
//! Layout is done by `comfy_table` with the markdown preset. Columns whose
//! cells are all numbers (or missing) are right aligned, everything else is
//! left aligned, and the separator row carries the matching `:` markers.
//! Missing values render as `nan`, floats use the `%g` convention.

use comfy_table::{CellAlignment, ContentArrangement, Table, presets::ASCII_MARKDOWN};

/// Text used for a missing value.
pub const MISSING_CELL: &str = "nan";

/// Column alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Missing,
}

impl Cell {
    /// Build a text cell, `None` becomes [`Cell::Missing`].
    pub fn text(value: Option<impl Into<String>>) -> Self {
        value.map_or(Cell::Missing, |v| Cell::Text(v.into()))
    }

    /// Build a float cell, `None` and NaN become [`Cell::Missing`].
    pub fn float(value: Option<f64>) -> Self {
        match value {
            Some(v) if !v.is_nan() => Cell::Float(v),
            _ => Cell::Missing,
        }
    }

    fn is_numeric(&self) -> bool {
        !matches!(self, Cell::Text(_))
    }

    fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => format_general(*f),
            Cell::Missing => MISSING_CELL.to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Int(value as i64)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::float(Some(value))
    }
}

/// A table built row by row and rendered in one go.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkdownTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl MarkdownTable {
    /// Create an empty table with the given headers.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with missing cells, long rows
    /// are truncated to the header width.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.headers.len(), Cell::Missing);
        self.rows.push(row);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at (`row`, `column`), if present.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Alignment of each column, derived from its cells.
    pub fn alignments(&self) -> Vec<Align> {
        (0..self.headers.len())
            .map(|c| {
                let numeric = !self.rows.is_empty()
                    && self.rows.iter().all(|row| row[c].is_numeric());
                if numeric { Align::Right } else { Align::Left }
            })
            .collect()
    }

    /// Render the table as pipe-format markdown, without a trailing newline.
    pub fn to_markdown(&self) -> String {
        let aligns = self.alignments();

        let mut table = Table::new();
        table.load_preset(ASCII_MARKDOWN);
        table.set_content_arrangement(ContentArrangement::Disabled);
        table.set_header(self.headers.iter().map(String::as_str));
        for row in &self.rows {
            table.add_row(row.iter().map(Cell::render));
        }
        for (index, align) in aligns.iter().enumerate() {
            if let Some(column) = table.column_mut(index) {
                column.set_cell_alignment(match align {
                    Align::Left => CellAlignment::Left,
                    Align::Right => CellAlignment::Right,
                });
            }
        }

        let rendered = table.to_string();
        rendered
            .lines()
            .enumerate()
            .map(|(index, line)| {
                if index == 1 {
                    mark_alignment(line, &aligns)
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Put the `:` markers into the header separator: `:---` for left aligned
/// columns, `---:` for right aligned ones.
fn mark_alignment(separator: &str, aligns: &[Align]) -> String {
    let segments = separator.trim_matches('|').split('|');
    let mut out = String::from("|");
    for (segment, align) in segments.zip(aligns) {
        let dashes = segment.chars().count().saturating_sub(1);
        match align {
            Align::Left => {
                out.push(':');
                out.push_str(&"-".repeat(dashes));
            }
            Align::Right => {
                out.push_str(&"-".repeat(dashes));
                out.push(':');
            }
        }
        out.push('|');
    }
    out
}

/// Format a float like C's `%g`: 6 significant digits, trailing zeros
/// trimmed, scientific notation when the exponent is below -4 or at
/// least 6.
pub fn format_general(value: f64) -> String {
    if value.is_nan() {
        return MISSING_CELL.to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let scientific = format!("{value:.5e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..6).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (5 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}"))
    }
}

fn trim_fraction(s: &str) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_general() {
        assert_eq!(format_general(3750.0), "3750");
        assert_eq!(format_general(43.92192982456141), "43.9219");
        assert_eq!(format_general(0.5), "0.5");
        assert_eq!(format_general(-2.0), "-2");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(0.00001), "1e-05");
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(999999.0), "999999");
        assert_eq!(format_general(f64::NAN), "nan");
    }

    #[test]
    fn test_table_alignment_and_padding() {
        let mut table = MarkdownTable::new(["", "species", "count"]);
        table.push_row(vec![Cell::Int(0), "Adelie".into(), Cell::Int(152)]);
        table.push_row(vec![Cell::Int(1), "Gentoo".into(), Cell::Missing]);

        let expected = "\
|   | species | count |
|--:|:--------|------:|
| 0 | Adelie  |   152 |
| 1 | Gentoo  |   nan |";
        assert_eq!(table.to_markdown(), expected);
    }

    #[test]
    fn test_alignment_markers_keep_column_width() {
        let separator = mark_alignment("|-----|----|", &[Align::Left, Align::Right]);
        assert_eq!(separator, "|:----|---:|");
    }

    #[test]
    fn test_header_only_table() {
        let table = MarkdownTable::new(["species", "count"]);
        assert_eq!(
            table.to_markdown(),
            "| species | count |\n|:--------|:------|"
        );
    }

    #[test]
    fn test_mixed_column_is_left_aligned() {
        let mut table = MarkdownTable::new(["value"]);
        table.push_row(vec![Cell::Float(1.5)]);
        table.push_row(vec!["top".into()]);
        assert_eq!(table.alignments(), vec![Align::Left]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = MarkdownTable::new(["a", "b"]);
        table.push_row(vec![Cell::Int(1)]);
        assert_eq!(table.cell(0, 1), Some(&Cell::Missing));
    }

    #[test]
    fn test_cell_constructors() {
        assert_eq!(Cell::float(Some(f64::NAN)), Cell::Missing);
        assert_eq!(Cell::text(None::<String>), Cell::Missing);
        assert_eq!(Cell::text(Some("male")), Cell::Text("male".to_string()));
    }
}

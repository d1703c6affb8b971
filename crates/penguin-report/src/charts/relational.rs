//! Scatter plot and pairwise scatter matrix.

use super::density::{auto_bin_count, histogram};
use super::figure::{Canvas, THEME, cartesian, continuous_mesh, draw_legend, padded_range, zero_based_range};
use crate::error::{ReportError, Result};
use crate::utils::categories_in_order;
use plotters::prelude::*;

/// Points of one category.
pub type PointGroup = (String, Vec<(f64, f64)>);

/// Pair up `xs` and `ys` per category, keeping rows where all three are
/// present. Groups follow first-appearance order.
pub fn group_points(
    categories: &[Option<String>],
    xs: &[Option<f64>],
    ys: &[Option<f64>],
) -> Vec<PointGroup> {
    let mut groups: Vec<PointGroup> = categories_in_order(categories)
        .into_iter()
        .map(|c| (c, Vec::new()))
        .collect();

    for ((category, x), y) in categories.iter().zip(xs).zip(ys) {
        let (Some(category), Some(x), Some(y)) = (category, x, y) else {
            continue;
        };
        if let Some((_, points)) = groups.iter_mut().find(|(name, _)| name == category) {
            points.push((*x, *y));
        }
    }
    groups
}

/// Scatter plot with one color per group and a legend.
pub fn draw_scatter(
    canvas: &Canvas<'_>,
    title: &str,
    groups: &[PointGroup],
    x_desc: &str,
    y_desc: &str,
) -> Result<()> {
    let x = padded_range(groups.iter().flat_map(|(_, p)| p.iter().map(|pt| pt.0)));
    let y = padded_range(groups.iter().flat_map(|(_, p)| p.iter().map(|pt| pt.1)));

    let mut chart = cartesian(canvas, title, x, y)?;
    continuous_mesh(&mut chart, x_desc, y_desc)?;

    for (index, (name, points)) in groups.iter().enumerate() {
        let color = THEME.color(index);
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&p| Circle::new(p, THEME.marker_radius, color.mix(0.8).filled())),
            )?
            .label(name.as_str())
            .legend(move |(x, y)| Circle::new((x, y), THEME.marker_radius, color.filled()));
    }

    if !groups.is_empty() {
        draw_legend(&mut chart)?;
    }
    Ok(())
}

// =============================================================================
// Pairplot
// =============================================================================

/// Complete observations for the scatter matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct PairData {
    pub columns: Vec<String>,
    pub groups: Vec<String>,
    /// `(group index, one value per column)`.
    pub rows: Vec<(usize, Vec<f64>)>,
}

impl PairData {
    /// Keep the rows where the category and every column are present.
    ///
    /// # Errors
    ///
    /// [`ReportError::NoChartData`] when there are no columns or no complete
    /// rows.
    pub fn complete_rows(
        columns: &[&str],
        categories: &[Option<String>],
        values: &[Vec<Option<f64>>],
    ) -> Result<Self> {
        if columns.is_empty() || values.len() != columns.len() {
            return Err(ReportError::NoChartData(
                "no numeric columns for the pairplot".to_string(),
            ));
        }

        let groups = categories_in_order(categories);
        let mut rows = Vec::new();
        for (row, category) in categories.iter().enumerate() {
            let Some(category) = category else {
                continue;
            };
            let complete: Option<Vec<f64>> = values
                .iter()
                .map(|column| column.get(row).copied().flatten())
                .collect();
            if let (Some(group), Some(complete)) =
                (groups.iter().position(|g| g == category), complete)
            {
                rows.push((group, complete));
            }
        }

        if rows.is_empty() {
            return Err(ReportError::NoChartData(
                "no complete rows for the pairplot".to_string(),
            ));
        }

        Ok(Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            groups,
            rows,
        })
    }

    fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |(_, values)| values[index])
    }

    fn group_column(&self, group: usize, index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .filter(|(g, _)| *g == group)
            .map(|(_, values)| values[index])
            .collect()
    }
}

/// k×k grid: per-group histograms on the diagonal, scatter elsewhere.
pub fn draw_pairplot(canvas: &Canvas<'_>, title: &str, data: &PairData) -> Result<()> {
    let k = data.columns.len();
    let area = canvas.titled(title, THEME.caption_font())?;
    let cells = area.split_evenly((k, k));
    let small_font = (THEME.font_family, THEME.label_size - 3);

    for (index, cell) in cells.iter().enumerate() {
        let (row, col) = (index / k, index % k);
        let x_range = padded_range(data.column(col));
        let x_desc = if row == k - 1 { data.columns[col].as_str() } else { "" };
        let y_desc = if col == 0 { data.columns[row].as_str() } else { "" };

        if row == col {
            let all: Vec<f64> = data.column(col).collect();
            let bins = auto_bin_count(&all);
            let per_group: Vec<_> = (0..data.groups.len())
                .map(|g| histogram(&data.group_column(g, col), bins))
                .collect();
            let max_count = per_group
                .iter()
                .flatten()
                .map(|b| b.count)
                .max()
                .unwrap_or(0);

            let mut chart = ChartBuilder::on(cell)
                .margin(6)
                .x_label_area_size(36)
                .y_label_area_size(44)
                .build_cartesian_2d(x_range, zero_based_range(max_count as f64))?;
            chart
                .configure_mesh()
                .x_labels(4)
                .y_labels(4)
                .x_desc(x_desc)
                .y_desc(y_desc)
                .label_style(small_font)
                .axis_desc_style(small_font)
                .draw()?;

            for (g, bins) in per_group.iter().enumerate() {
                let color = THEME.color(g);
                chart.draw_series(bins.iter().map(|b| {
                    Rectangle::new([(b.left, 0.0), (b.right, b.count as f64)], color.mix(0.45).filled())
                }))?;
            }
        } else {
            let y_range = padded_range(data.column(row));
            let mut chart = ChartBuilder::on(cell)
                .margin(6)
                .x_label_area_size(36)
                .y_label_area_size(44)
                .build_cartesian_2d(x_range, y_range)?;
            chart
                .configure_mesh()
                .x_labels(4)
                .y_labels(4)
                .x_desc(x_desc)
                .y_desc(y_desc)
                .label_style(small_font)
                .axis_desc_style(small_font)
                .draw()?;

            for (g, name) in data.groups.iter().enumerate() {
                let color = THEME.color(g);
                let points: Vec<(f64, f64)> = data
                    .rows
                    .iter()
                    .filter(|(group, _)| *group == g)
                    .map(|(_, values)| (values[col], values[row]))
                    .collect();
                let series = chart.draw_series(
                    points
                        .into_iter()
                        .map(|p| Circle::new(p, 2, color.mix(0.8).filled())),
                )?;
                if row == 0 && col == k - 1 {
                    series
                        .label(name.as_str())
                        .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
                }
            }

            if row == 0 && col == k - 1 {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .label_font(small_font)
                    .background_style(THEME.background.mix(0.8))
                    .border_style(THEME.foreground)
                    .draw()?;
            }
        }
    }
    Ok(())
}

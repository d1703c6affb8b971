//! Correlation heatmap and stacked percentage bars.

use super::figure::{Canvas, THEME, cartesian, categorical_mesh, category_label, category_range, coolwarm, draw_legend};
use crate::crosstab::ContingencyTable;
use crate::error::Result;
use crate::profiler::CorrelationMatrix;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Annotated heatmap on a fixed [-1, 1] diverging scale. Undefined cells
/// stay blank.
pub fn draw_heatmap(canvas: &Canvas<'_>, title: &str, matrix: &CorrelationMatrix) -> Result<()> {
    let k = matrix.size();
    let x_labels = matrix.columns.clone();
    // row 0 sits at the top
    let y_labels: Vec<String> = matrix.columns.iter().rev().cloned().collect();

    let mut chart = ChartBuilder::on(canvas)
        .caption(title, THEME.caption_font())
        .margin(12)
        .x_label_area_size(56)
        .y_label_area_size(130)
        .build_cartesian_2d(category_range(k), category_range(k))?;

    let x_formatter = |x: &f64| category_label(&x_labels, *x);
    let y_formatter = |y: &f64| category_label(&y_labels, *y);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(k.max(1))
        .y_labels(k.max(1))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .label_style((THEME.font_family, THEME.label_size - 2))
        .draw()?;

    let cells = (0..k).flat_map(|row| (0..k).map(move |col| (row, col)));
    let mut filled = Vec::new();
    let mut annotations = Vec::new();
    for (row, col) in cells {
        let Some(value) = matrix.get(row, col) else {
            continue;
        };
        let (x, y) = (col as f64, (k - 1 - row) as f64);
        filled.push(Rectangle::new(
            [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
            coolwarm(value).filled(),
        ));

        let text_color = if value.abs() > 0.6 { &THEME.background } else { &THEME.foreground };
        let style = TextStyle::from((THEME.font_family, THEME.annotation_size).into_font())
            .color(text_color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        annotations.push(Text::new(format!("{value:.2}"), (x, y), style));
    }

    chart.draw_series(filled)?;
    chart.draw_series(annotations)?;
    Ok(())
}

/// Island columns stacked by species share, each summing to 100%.
///
/// # Errors
///
/// Fails when the table is empty or an island has no observations.
pub fn draw_stacked_percent(canvas: &Canvas<'_>, title: &str, table: &ContingencyTable) -> Result<()> {
    let shares = table.column_shares()?;

    let mut chart = cartesian(canvas, title, category_range(table.islands.len()), 0.0..105.0)?;
    categorical_mesh(&mut chart, &table.islands, "island", "percent")?;

    let mut bottoms = vec![0.0; table.islands.len()];
    for (s, species) in table.species.iter().enumerate() {
        let color = THEME.color(s);
        let bars: Vec<_> = shares
            .iter()
            .enumerate()
            .map(|(i, island)| {
                let center = i as f64;
                let bottom = bottoms[i];
                let top = bottom + island[s];
                Rectangle::new([(center - 0.3, bottom), (center + 0.3, top)], color.filled())
            })
            .collect();
        for (bottom, island) in bottoms.iter_mut().zip(&shares) {
            *bottom += island[s];
        }

        chart
            .draw_series(bars)?
            .label(species.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    draw_legend(&mut chart)?;
    Ok(())
}

//! Charts with one band per category: box, violin, strip, swarm, counts.
//!
//! Category `i` is centered at x = i on a continuous axis; labels come from
//! [`categorical_mesh`].

use super::density::{BoxSummary, jitter_offsets, kde_curve, swarm_offsets};
use super::figure::{Canvas, THEME, cartesian, categorical_mesh, category_range, padded_range, zero_based_range};
use crate::error::{ReportError, Result};
use crate::profiler::statistics::{quantile_sorted, sorted};
use plotters::prelude::*;

/// Values of one category.
pub type ValueGroup = (String, Vec<f64>);

const BOX_HALF_WIDTH: f64 = 0.4;
const VIOLIN_HALF_WIDTH: f64 = 0.4;
const STRIP_JITTER: f64 = 0.2;
const SWARM_MAX_OFFSET: f64 = 0.45;

fn labels(groups: &[ValueGroup]) -> Vec<String> {
    groups.iter().map(|(name, _)| name.clone()).collect()
}

fn value_range(groups: &[ValueGroup]) -> std::ops::Range<f64> {
    padded_range(groups.iter().flat_map(|(_, values)| values.iter().copied()))
}

/// Box from Q1 to Q3 with median, whiskers and fliers.
pub fn draw_box(canvas: &Canvas<'_>, title: &str, groups: &[ValueGroup], x_desc: &str, y_desc: &str) -> Result<()> {
    let mut chart = cartesian(canvas, title, category_range(groups.len()), value_range(groups))?;
    categorical_mesh(&mut chart, &labels(groups), x_desc, y_desc)?;

    let line = THEME.foreground.stroke_width(2);
    for (index, (_, values)) in groups.iter().enumerate() {
        let Some(summary) = BoxSummary::from_values(values) else {
            continue;
        };
        let center = index as f64;
        let (left, right) = (center - BOX_HALF_WIDTH, center + BOX_HALF_WIDTH);
        let (cap_left, cap_right) = (center - BOX_HALF_WIDTH / 2.0, center + BOX_HALF_WIDTH / 2.0);

        chart.draw_series([
            Rectangle::new([(left, summary.q1), (right, summary.q3)], THEME.color(index).filled()),
            Rectangle::new([(left, summary.q1), (right, summary.q3)], line),
        ])?;
        chart.draw_series([
            PathElement::new(vec![(left, summary.median), (right, summary.median)], line),
            PathElement::new(vec![(center, summary.q3), (center, summary.whisker_high)], line),
            PathElement::new(vec![(center, summary.q1), (center, summary.whisker_low)], line),
            PathElement::new(vec![(cap_left, summary.whisker_high), (cap_right, summary.whisker_high)], line),
            PathElement::new(vec![(cap_left, summary.whisker_low), (cap_right, summary.whisker_low)], line),
        ])?;
        chart.draw_series(
            summary
                .fliers
                .iter()
                .map(|&v| Circle::new((center, v), THEME.marker_radius, THEME.foreground.stroke_width(1))),
        )?;
    }
    Ok(())
}

/// Mirrored density per category with the median and quartile range inside.
pub fn draw_violin(canvas: &Canvas<'_>, title: &str, groups: &[ValueGroup], x_desc: &str, y_desc: &str) -> Result<()> {
    let curves: Vec<Option<Vec<(f64, f64)>>> = groups
        .iter()
        .map(|(_, values)| kde_curve(values, 2.0, 120))
        .collect();

    let y = padded_range(
        curves
            .iter()
            .flatten()
            .flat_map(|curve| curve.iter().map(|p| p.0))
            .chain(groups.iter().flat_map(|(_, v)| v.iter().copied())),
    );
    let mut chart = cartesian(canvas, title, category_range(groups.len()), y)?;
    categorical_mesh(&mut chart, &labels(groups), x_desc, y_desc)?;

    for (index, ((_, values), curve)) in groups.iter().zip(&curves).enumerate() {
        let center = index as f64;
        let color = THEME.color(index);

        if let Some(curve) = curve {
            let peak = curve.iter().map(|p| p.1).fold(0.0, f64::max);
            if peak > 0.0 {
                let scale = VIOLIN_HALF_WIDTH / peak;
                let mut outline: Vec<(f64, f64)> = curve
                    .iter()
                    .map(|&(v, d)| (center + d * scale, v))
                    .collect();
                outline.extend(curve.iter().rev().map(|&(v, d)| (center - d * scale, v)));

                chart.draw_series(std::iter::once(Polygon::new(outline.clone(), color.filled())))?;
                outline.push(outline[0]);
                chart.draw_series(std::iter::once(PathElement::new(outline, THEME.foreground.stroke_width(1))))?;
            }
        }

        let data = sorted(values);
        if let (Some(q1), Some(median), Some(q3)) = (
            quantile_sorted(&data, 0.25),
            quantile_sorted(&data, 0.5),
            quantile_sorted(&data, 0.75),
        ) {
            chart.draw_series(std::iter::once(Rectangle::new(
                [(center - 0.03, q1), (center + 0.03, q3)],
                THEME.foreground.filled(),
            )))?;
            chart.draw_series(std::iter::once(Circle::new((center, median), 3, THEME.background.filled())))?;
        }
    }
    Ok(())
}

/// Points at the category center with seeded uniform jitter.
pub fn draw_strip(
    canvas: &Canvas<'_>,
    title: &str,
    groups: &[ValueGroup],
    x_desc: &str,
    y_desc: &str,
    seed: u64,
) -> Result<()> {
    let mut chart = cartesian(canvas, title, category_range(groups.len()), value_range(groups))?;
    categorical_mesh(&mut chart, &labels(groups), x_desc, y_desc)?;

    for (index, (_, values)) in groups.iter().enumerate() {
        let offsets = jitter_offsets(values.len(), STRIP_JITTER, seed.wrapping_add(index as u64));
        let color = THEME.color(index);
        chart.draw_series(
            values
                .iter()
                .zip(offsets)
                .map(|(&v, dx)| Circle::new((index as f64 + dx, v), THEME.marker_radius, color.mix(0.8).filled())),
        )?;
    }
    Ok(())
}

/// Non-overlapping beeswarm per category.
///
/// # Errors
///
/// [`ReportError::NoChartData`] when no category has any value.
pub fn draw_swarm(canvas: &Canvas<'_>, title: &str, groups: &[ValueGroup], x_desc: &str, y_desc: &str) -> Result<()> {
    if groups.iter().all(|(_, values)| values.is_empty()) {
        return Err(ReportError::NoChartData(format!("no values for '{y_desc}'")));
    }

    let y = value_range(groups);
    let (width, height) = canvas.dim_in_pixel();
    // rough size of the plotting area once captions and labels are placed
    let plot_width = (f64::from(width) - 100.0).max(1.0);
    let plot_height = (f64::from(height) - 110.0).max(1.0);
    let diameter = f64::from(THEME.marker_radius * 2);
    let value_per_diameter = (y.end - y.start) * diameter / plot_height;
    let band_per_diameter = groups.len() as f64 * diameter / plot_width;

    let mut chart = cartesian(canvas, title, category_range(groups.len()), y)?;
    categorical_mesh(&mut chart, &labels(groups), x_desc, y_desc)?;

    for (index, (_, values)) in groups.iter().enumerate() {
        let positions: Vec<f64> = values.iter().map(|v| v / value_per_diameter).collect();
        let offsets = swarm_offsets(&positions);
        let color = THEME.color(index);
        chart.draw_series(values.iter().zip(offsets).map(|(&v, dx)| {
            let dx = (dx * band_per_diameter).clamp(-SWARM_MAX_OFFSET, SWARM_MAX_OFFSET);
            Circle::new((index as f64 + dx, v), THEME.marker_radius, color.filled())
        }))?;
    }
    Ok(())
}

/// One bar per category.
pub fn draw_counts(canvas: &Canvas<'_>, title: &str, counts: &[(String, usize)], x_desc: &str) -> Result<()> {
    let max = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
    let labels: Vec<String> = counts.iter().map(|(name, _)| name.clone()).collect();

    let mut chart = cartesian(canvas, title, category_range(counts.len()), zero_based_range(max as f64))?;
    categorical_mesh(&mut chart, &labels, x_desc, "count")?;

    chart.draw_series(counts.iter().enumerate().map(|(index, (_, count))| {
        let center = index as f64;
        Rectangle::new(
            [(center - BOX_HALF_WIDTH, 0.0), (center + BOX_HALF_WIDTH, *count as f64)],
            THEME.color(index).filled(),
        )
    }))?;
    Ok(())
}

//! Histogram and per-group density curves.

use super::density::{auto_bin_count, histogram, kde_curve};
use super::figure::{Canvas, THEME, cartesian, continuous_mesh, draw_legend, padded_range, zero_based_range};
use crate::error::Result;
use plotters::prelude::*;
use tracing::debug;

/// Histogram with the `auto` bin rule.
pub fn draw_histogram(canvas: &Canvas<'_>, title: &str, values: &[f64], x_desc: &str) -> Result<()> {
    let bins = histogram(values, auto_bin_count(values));
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);
    let x = padded_range(bins.iter().flat_map(|b| [b.left, b.right]));

    let mut chart = cartesian(canvas, title, x, zero_based_range(max_count as f64))?;
    continuous_mesh(&mut chart, x_desc, "Count")?;

    let color = THEME.color(0);
    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.left, 0.0), (b.right, b.count as f64)], color.mix(0.75).filled())
    }))?;
    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new([(b.left, 0.0), (b.right, b.count as f64)], THEME.foreground.stroke_width(1))
    }))?;
    Ok(())
}

/// Filled density curve per group. Groups too small for a bandwidth are
/// left out of the plot.
pub fn draw_kde(
    canvas: &Canvas<'_>,
    title: &str,
    groups: &[(String, Vec<f64>)],
    x_desc: &str,
) -> Result<()> {
    let curves: Vec<(usize, &str, Vec<(f64, f64)>)> = groups
        .iter()
        .enumerate()
        .filter_map(|(index, (name, values))| match kde_curve(values, 3.0, 200) {
            Some(curve) => Some((index, name.as_str(), curve)),
            None => {
                debug!("Skipping density for '{}': not enough spread", name);
                None
            }
        })
        .collect();

    let x = padded_range(curves.iter().flat_map(|(_, _, c)| c.iter().map(|p| p.0)));
    let max_density = curves
        .iter()
        .flat_map(|(_, _, c)| c.iter().map(|p| p.1))
        .fold(0.0, f64::max);

    let mut chart = cartesian(canvas, title, x, zero_based_range(max_density))?;
    continuous_mesh(&mut chart, x_desc, "Density")?;

    for (index, name, curve) in &curves {
        let color = THEME.color(*index);
        chart
            .draw_series(
                AreaSeries::new(curve.iter().copied(), 0.0, color.mix(0.25)).border_style(color),
            )?
            .label(*name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.mix(0.5).filled()));
    }

    if !curves.is_empty() {
        draw_legend(&mut chart)?;
    }
    Ok(())
}

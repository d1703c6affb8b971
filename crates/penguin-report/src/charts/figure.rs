//! Drawing surfaces, theme and axis helpers shared by every renderer.
//!
//! [`render_figure`] owns the lifetime of a surface: it is created, filled
//! with the theme background, handed to the drawing closure, presented and
//! dropped before the function returns. A failed draw leaves no file behind.

use crate::error::{ReportError, Result};
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use std::fs;
use std::ops::Range;
use std::path::Path;
use tracing::debug;

/// A drawing surface backed by an SVG file.
pub type Canvas<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// A 2D chart with continuous axes on an SVG canvas.
pub type Chart<'a, 'b> = ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

// =============================================================================
// Theme
// =============================================================================

/// Fixed visual styling applied to every chart.
#[derive(Debug)]
pub struct Theme {
    pub background: RGBColor,
    pub foreground: RGBColor,
    pub font_family: &'static str,
    pub caption_size: u32,
    pub label_size: u32,
    pub annotation_size: u32,
    pub marker_radius: i32,
    pub palette: [RGBColor; 10],
}

impl Theme {
    /// Categorical color for the `index`-th group, cycling through the palette.
    pub fn color(&self, index: usize) -> RGBColor {
        self.palette[index % self.palette.len()]
    }

    pub fn caption_font(&self) -> (&'static str, u32) {
        (self.font_family, self.caption_size)
    }

    pub fn label_font(&self) -> (&'static str, u32) {
        (self.font_family, self.label_size)
    }
}

/// The report theme: white background, tab10 palette.
pub static THEME: Theme = Theme {
    background: RGBColor(255, 255, 255),
    foreground: RGBColor(38, 38, 38),
    font_family: "sans-serif",
    caption_size: 22,
    label_size: 15,
    annotation_size: 14,
    marker_radius: 4,
    palette: [
        RGBColor(31, 119, 180),
        RGBColor(255, 127, 14),
        RGBColor(44, 160, 44),
        RGBColor(214, 39, 40),
        RGBColor(148, 103, 189),
        RGBColor(140, 86, 75),
        RGBColor(227, 119, 194),
        RGBColor(127, 127, 127),
        RGBColor(188, 189, 34),
        RGBColor(23, 190, 207),
    ],
};

/// Diverging blue-white-red scale; `value` is clamped to [-1, 1].
pub fn coolwarm(value: f64) -> RGBColor {
    const COLD: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

    let t = value.clamp(-1.0, 1.0);
    let (from, to, f) = if t < 0.0 {
        (COLD, NEUTRAL, t + 1.0)
    } else {
        (NEUTRAL, WARM, t)
    };
    let mix = |a: f64, b: f64| (a + (b - a) * f).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

// =============================================================================
// Surfaces
// =============================================================================

/// Convert a figure size in inches to pixels.
pub fn figure_pixels(inches: (f64, f64), dpi: u32) -> (u32, u32) {
    let dpi = f64::from(dpi);
    (
        (inches.0 * dpi).round().max(1.0) as u32,
        (inches.1 * dpi).round().max(1.0) as u32,
    )
}

/// Create a surface at `path`, run `draw` on it and save it.
///
/// On any error the partially written file is removed and the error is
/// returned; the surface never outlives this call.
pub fn render_figure<F>(path: &Path, size: (u32, u32), draw: F) -> Result<()>
where
    F: FnOnce(&Canvas<'_>) -> Result<()>,
{
    let outcome = {
        let root = SVGBackend::new(path, size).into_drawing_area();
        root.fill(&THEME.background)
            .map_err(ReportError::from)
            .and_then(|_| draw(&root))
            .and_then(|_| root.present().map_err(ReportError::from))
    };

    if outcome.is_err() && path.exists() {
        debug!("Removing partial figure {}", path.display());
        let _ = fs::remove_file(path);
    }
    outcome
}

// =============================================================================
// Axes
// =============================================================================

/// Data range padded by 5% on both ends.
///
/// Empty input yields `0..1`; a single distinct value is widened by 0.5.
pub fn padded_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if (max - min).abs() < f64::EPSILON {
        return (min - 0.5)..(max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

/// Range from zero to a bit above `max`, for bar heights and densities.
pub fn zero_based_range(max: f64) -> Range<f64> {
    if max.is_finite() && max > 0.0 {
        0.0..max * 1.05
    } else {
        0.0..1.0
    }
}

/// Axis range holding `count` categories centered on 0, 1, 2, ...
pub fn category_range(count: usize) -> Range<f64> {
    -0.5..(count.max(1) as f64 - 0.5)
}

/// Label of the category at axis position `x`, empty between categories.
pub fn category_label(labels: &[String], x: f64) -> String {
    let index = x.round();
    if (x - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    labels.get(index as usize).cloned().unwrap_or_default()
}

/// Start a chart with the theme caption and label areas.
pub fn cartesian<'a, 'b>(
    canvas: &'a Canvas<'b>,
    title: &str,
    x: Range<f64>,
    y: Range<f64>,
) -> Result<Chart<'a, 'b>> {
    let chart = ChartBuilder::on(canvas)
        .caption(title, THEME.caption_font())
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x, y)?;
    Ok(chart)
}

/// Draw a mesh with a categorical x axis.
pub fn categorical_mesh(
    chart: &mut Chart<'_, '_>,
    labels: &[String],
    x_desc: &str,
    y_desc: &str,
) -> Result<()> {
    let formatter = |x: &f64| category_label(labels, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&formatter)
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(THEME.label_font())
        .axis_desc_style(THEME.label_font())
        .draw()?;
    Ok(())
}

/// Draw a mesh with continuous axes.
pub fn continuous_mesh(chart: &mut Chart<'_, '_>, x_desc: &str, y_desc: &str) -> Result<()> {
    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style(THEME.label_font())
        .axis_desc_style(THEME.label_font())
        .draw()?;
    Ok(())
}

/// Draw the legend of every labeled series.
pub fn draw_legend<'a, 'b: 'a>(chart: &mut Chart<'a, 'b>) -> Result<()> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(THEME.label_font())
        .background_style(THEME.background.mix(0.8))
        .border_style(THEME.foreground)
        .draw()?;
    Ok(())
}

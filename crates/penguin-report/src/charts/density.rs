//! Numeric helpers behind the distribution and categorical charts.

use crate::profiler::statistics::{iqr_sorted, quantile_sorted, sorted, std_dev};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Evenly spaced points from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

// =============================================================================
// Kernel density
// =============================================================================

/// Scott's rule bandwidth: `std * n^(-1/5)`.
///
/// `None` for fewer than two values or zero spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let std = std_dev(values)?;
    if std <= 0.0 {
        return None;
    }
    Some(std * (values.len() as f64).powf(-0.2))
}

/// Gaussian kernel density of `values` evaluated at each grid point.
pub fn gaussian_kde(values: &[f64], bandwidth: f64, grid: &[f64]) -> Vec<f64> {
    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
    grid.iter()
        .map(|x| {
            values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect()
}

/// Density curve extending `cut` bandwidths past the data on each side.
pub fn kde_curve(values: &[f64], cut: f64, points: usize) -> Option<Vec<(f64, f64)>> {
    let bandwidth = scott_bandwidth(values)?;
    let sorted = sorted(values);
    let lo = sorted.first()? - cut * bandwidth;
    let hi = sorted.last()? + cut * bandwidth;
    let grid = linspace(lo, hi, points);
    let density = gaussian_kde(&sorted, bandwidth, &grid);
    Some(grid.into_iter().zip(density).collect())
}

// =============================================================================
// Histogram
// =============================================================================

/// Upper bound on the bin count picked by [`auto_bin_count`].
pub const MAX_AUTO_BINS: usize = 200;

/// Number of bins from the `auto` rule: the smaller of the Sturges and
/// Freedman-Diaconis bin widths.
///
/// A narrow interquartile range inside a wide span can push the
/// Freedman-Diaconis count past [`MAX_AUTO_BINS`]; the Sturges count is
/// used instead.
pub fn auto_bin_count(values: &[f64]) -> usize {
    let sorted = sorted(values);
    let n = sorted.len();
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return 1;
    };
    let span = last - first;
    if span <= 0.0 {
        return 1;
    }

    let sturges_bins = ((n as f64).log2() + 1.0).ceil().max(1.0) as usize;
    let sturges = span / ((n as f64).log2() + 1.0);
    let fd = iqr_sorted(&sorted).map_or(0.0, |iqr| 2.0 * iqr * (n as f64).powf(-1.0 / 3.0));
    let width = if fd > 0.0 { fd.min(sturges) } else { sturges };

    let bins = (span / width).ceil();
    if !bins.is_finite() || bins > MAX_AUTO_BINS as f64 {
        return sturges_bins.min(MAX_AUTO_BINS);
    }
    (bins as usize).max(1)
}

/// A histogram bin: `[left, right)` and its count. The last bin is closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub left: f64,
    pub right: f64,
    pub count: usize,
}

/// Equal-width bins spanning the data.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let sorted = sorted(values);
    let (Some(&first), Some(&last)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };
    let bins = bins.max(1);
    let (lo, hi) = if last > first {
        (first, last)
    } else {
        (first - 0.5, last + 0.5)
    };
    let width = (hi - lo) / bins as f64;

    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            left: lo + width * i as f64,
            right: lo + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for v in sorted {
        let index = (((v - lo) / width).floor() as usize).min(bins - 1);
        out[index].count += 1;
    }
    out
}

// =============================================================================
// Box summary
// =============================================================================

/// Five-number style summary used by the box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest data point within `q1 - 1.5 * iqr`.
    pub whisker_low: f64,
    /// Highest data point within `q3 + 1.5 * iqr`.
    pub whisker_high: f64,
    /// Points beyond the whiskers.
    pub fliers: Vec<f64>,
}

impl BoxSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted(values);
        let q1 = quantile_sorted(&sorted, 0.25)?;
        let median = quantile_sorted(&sorted, 0.5)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let reach = 1.5 * (q3 - q1);
        let (low_fence, high_fence) = (q1 - reach, q3 + reach);

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|v| *v >= low_fence && *v <= high_fence)
            .collect();
        let fliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < low_fence || *v > high_fence)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low: inside.first().copied().unwrap_or(q1),
            whisker_high: inside.last().copied().unwrap_or(q3),
            fliers,
        })
    }
}

// =============================================================================
// Point layouts
// =============================================================================

/// Uniform horizontal jitter in `[-width, width]`, reproducible per seed.
pub fn jitter_offsets(count: usize, width: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count).map(|_| rng.gen_range(-width..=width)).collect()
}

/// Beeswarm layout for points of unit diameter.
///
/// `positions` are the values along the value axis, already scaled so that
/// 1.0 equals one marker diameter. Points are placed in ascending order at
/// the smallest horizontal offset (in diameters) that keeps them clear of
/// every point placed before. Offsets are returned in input order.
pub fn swarm_offsets(positions: &[f64]) -> Vec<f64> {
    const EPS: f64 = 1e-9;

    let mut order: Vec<usize> = (0..positions.len()).collect();
    order.sort_by(|a, b| positions[*a].total_cmp(&positions[*b]));

    let mut placed: Vec<(f64, f64)> = Vec::with_capacity(positions.len());
    let mut offsets = vec![0.0; positions.len()];

    for index in order {
        let y = positions[index];
        let neighbors: Vec<(f64, f64)> = placed
            .iter()
            .copied()
            .filter(|(_, py)| (py - y).abs() < 1.0)
            .collect();

        let mut candidates = vec![0.0];
        for (px, py) in &neighbors {
            let dx = (1.0 - (py - y).powi(2)).sqrt();
            candidates.push(px + dx);
            candidates.push(px - dx);
        }
        candidates.sort_by(|a: &f64, b: &f64| {
            a.abs().total_cmp(&b.abs()).then_with(|| b.total_cmp(a))
        });

        let x = candidates
            .into_iter()
            .find(|cx| {
                neighbors
                    .iter()
                    .all(|(px, py)| (cx - px).powi(2) + (y - py).powi(2) >= 1.0 - EPS)
            })
            .unwrap_or(0.0);

        offsets[index] = x;
        placed.push((x, y));
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_scott_bandwidth() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let expected = 2.5f64.sqrt() * 5f64.powf(-0.2);
        assert!((scott_bandwidth(&values).unwrap() - expected).abs() < 1e-12);
        assert_eq!(scott_bandwidth(&[3.0]), None);
        assert_eq!(scott_bandwidth(&[3.0, 3.0]), None);
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let values = [3500.0, 3700.0, 3800.0, 4100.0, 5000.0, 5200.0];
        let curve = kde_curve(&values, 3.0, 400).unwrap();
        let step = curve[1].0 - curve[0].0;
        let area: f64 = curve.iter().map(|(_, d)| d * step).sum();
        assert!((area - 1.0).abs() < 0.02, "area was {area}");
        assert!(curve.iter().all(|(_, d)| *d >= 0.0));
    }

    #[test]
    fn test_auto_bin_count() {
        assert_eq!(auto_bin_count(&[]), 1);
        assert_eq!(auto_bin_count(&[4.0, 4.0, 4.0]), 1);

        // 100 evenly spread values: the Sturges width is the narrower one here
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        assert_eq!(auto_bin_count(&values), 8);
    }

    #[test]
    fn test_auto_bin_count_is_capped_for_tight_quartiles() {
        // wide tails around a cluster only a few millionths wide
        let mut values = vec![2700.0; 10];
        values.extend((0..80).map(|i| 4000.0 + f64::from(i) * 1e-6));
        values.extend(vec![6300.0; 10]);

        let bins = auto_bin_count(&values);
        assert!(bins <= MAX_AUTO_BINS);
        assert_eq!(bins, 8);
        assert_eq!(histogram(&values, bins).len(), 8);
    }

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [1.0, 2.0, 2.5, 3.0, 10.0];
        let bins = histogram(&values, 3);
        assert_eq!(bins.len(), 3);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[2].count, 1);
        assert_eq!(bins[2].right, 10.0);
    }

    #[test]
    fn test_box_summary_whiskers_and_fliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let summary = BoxSummary::from_values(&values).unwrap();

        assert_eq!(summary.median, 3.5);
        assert_eq!(summary.whisker_low, 1.0);
        assert_eq!(summary.whisker_high, 5.0);
        assert_eq!(summary.fliers, vec![100.0]);
        assert!(BoxSummary::from_values(&[]).is_none());
    }

    #[test]
    fn test_jitter_is_seeded_and_bounded() {
        let a = jitter_offsets(50, 0.2, 42);
        let b = jitter_offsets(50, 0.2, 42);
        let c = jitter_offsets(50, 0.2, 7);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|x| x.abs() <= 0.2));
    }

    #[test]
    fn test_swarm_has_no_overlaps() {
        let positions = [0.0, 0.1, 0.2, 0.3, 2.0, 0.15, 5.0];
        let offsets = swarm_offsets(&positions);

        assert_eq!(offsets.len(), positions.len());
        // isolated points stay on the center line
        assert_eq!(offsets[4], 0.0);
        assert_eq!(offsets[6], 0.0);
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let d2 = (offsets[i] - offsets[j]).powi(2) + (positions[i] - positions[j]).powi(2);
                assert!(d2 >= 1.0 - 1e-6, "points {i} and {j} overlap");
            }
        }
    }

    #[test]
    fn test_swarm_first_point_centered() {
        let offsets = swarm_offsets(&[1.0, 1.0]);
        assert_eq!(offsets[0], 0.0);
        assert!((offsets[1].abs() - 1.0).abs() < 1e-9);
    }
}

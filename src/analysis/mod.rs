//! Descriptive statistics and histograms over one numeric column.
//!
//! [`describe`] follows the usual data-frame conventions: sample standard
//! deviation (n - 1) and quartiles by linear interpolation between order
//! statistics. [`Histogram`] bins values on a linear or log10 axis and renders
//! them as terminal bars.

use std::fmt;
use std::fmt::Write as _;

/// Summary statistics of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Computes summary statistics. Returns `None` for an empty column.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn describe(values: &[u64]) -> Option<Summary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let std = (sorted.len() > 1).then(|| {
        let sum_sq: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
        (sum_sq / (n - 1.0)).sqrt()
    });

    Some(Summary {
        count: sorted.len(),
        mean,
        std,
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

/// Linear interpolation between the order statistics around `q * (n - 1)`.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

impl fmt::Display for Summary {
    #[allow(clippy::cast_precision_loss)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let std = self.std.unwrap_or(f64::NAN);
        let rows = [
            ("count", self.count as f64),
            ("mean", self.mean),
            ("std", std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.median),
            ("75%", self.q75),
            ("max", self.max),
        ];
        for (label, value) in rows {
            writeln!(f, "{label:<8}{value:>16.6}")?;
        }
        Ok(())
    }
}

/// Equal-width bins on a linear or log10 value axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<usize>,
    excluded: usize,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width bins between min and max.
    ///
    /// Returns `None` if there are no values or `bins` is zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn linear(values: &[u64], bins: usize) -> Option<Self> {
        let points: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        let (edges, counts) = bin(&points, bins)?;
        Some(Self {
            edges,
            counts,
            excluded: 0,
        })
    }

    /// Bins `values` into `bins` bins equally wide in log10 space.
    ///
    /// Zero cannot be placed on a log axis; such values are left out and
    /// reported by [`Histogram::excluded`]. Returns `None` if no positive
    /// values remain or `bins` is zero.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn log10(values: &[u64], bins: usize) -> Option<Self> {
        let points: Vec<f64> = values
            .iter()
            .filter(|&&v| v > 0)
            .map(|&v| (v as f64).log10())
            .collect();
        let excluded = values.len() - points.len();
        let (log_edges, counts) = bin(&points, bins)?;
        Some(Self {
            edges: log_edges.into_iter().map(|e| 10f64.powf(e)).collect(),
            counts,
            excluded,
        })
    }

    /// Bin boundaries in value units (`counts().len() + 1` entries).
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Values per bin.
    #[must_use]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Values that could not be placed on the axis.
    #[must_use]
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Values placed in bins.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Renders one bar per bin, the longest bar `width` characters wide.
    #[must_use]
    pub fn render(&self, title: &str, x_label: &str, y_label: &str, width: usize) -> String {
        let peak = self.counts.iter().copied().max().unwrap_or(0).max(1);
        let mut out = String::new();
        let _ = writeln!(out, "{title}");
        let _ = writeln!(out, "{x_label:>27} | {y_label}");

        for (i, &count) in self.counts.iter().enumerate() {
            let bar = "#".repeat(count * width / peak);
            let _ = writeln!(
                out,
                "{:>12.0} - {:<12.0} | {bar} {count}",
                self.edges[i],
                self.edges[i + 1]
            );
        }

        if self.excluded > 0 {
            let _ = writeln!(out, "({} values excluded from this axis)", self.excluded);
        }
        out
    }
}

/// Equal-width binning of `points`; the last bin is closed on the right.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn bin(points: &[f64], bins: usize) -> Option<(Vec<f64>, Vec<usize>)> {
    if points.is_empty() || bins == 0 {
        return None;
    }

    let mut lo = points.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for &p in points {
        let idx = (((p - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Some((edges, counts))
}

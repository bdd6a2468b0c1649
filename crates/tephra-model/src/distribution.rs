//! Empirical distribution views of a sample set: CDF points and a density histogram.

use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};

/// Number of histogram bins used for distribution output.
pub const HISTOGRAM_BINS: usize = 50;

/// Empirical CDF: sorted sample values against evenly spaced probabilities in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmpiricalCdf {
    /// `(volume, cumulative probability)` pairs in ascending order.
    pub points: Vec<(f64, f64)>,
}

impl EmpiricalCdf {
    /// Build the CDF from unsorted samples; a single sample maps to probability 0.
    ///
    /// Fails with [`ModelError::NoSamples`] on an empty slice.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(ModelError::NoSamples);
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let step = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };
        let points = sorted
            .into_iter()
            .enumerate()
            .map(|(i, v)| (v, i as f64 * step))
            .collect();
        Ok(Self { points })
    }
}

/// Probability-density histogram with equal-width bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges, `bins + 1` values.
    pub edges: Vec<f64>,
    /// Density per bin; integrates to 1 over the edges.
    pub density: Vec<f64>,
}

impl Histogram {
    /// Bin `samples` into `bins` equal-width bins spanning their range.
    ///
    /// A sample set with a single distinct value is binned over
    /// `[value - 0.5, value + 0.5]`. The last bin includes its upper edge.
    pub fn density(samples: &[f64], bins: usize) -> Result<Self> {
        if samples.is_empty() {
            return Err(ModelError::NoSamples);
        }
        if bins == 0 {
            return Err(ModelError::InvalidBinCount);
        }

        let (mut lo, mut hi) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for &v in samples {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let norm = samples.len() as f64 * width;
        let density = counts.into_iter().map(|c| c as f64 / norm).collect();
        Ok(Self { edges, density })
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.density.len()
    }
}

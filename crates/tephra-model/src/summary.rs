//! Percentile and descriptive summaries of a volume sample set.

use crate::{ModelError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Final estimate for one place: 10th, 50th and 90th percentile clean-up volume (m³).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanupResult {
    /// Place or area name.
    pub place_name: String,
    /// 10th percentile volume (m³).
    pub p10: f64,
    /// Median volume (m³).
    pub p50: f64,
    /// 90th percentile volume (m³).
    pub p90: f64,
}

/// Summary statistics of a sample set, in the layout of a `describe()` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleStatistics {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean (m³).
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator); NaN for a single sample.
    pub std_dev: f64,
    /// Smallest sample (m³).
    pub min: f64,
    /// 25th percentile (m³).
    pub p25: f64,
    /// Median (m³).
    pub p50: f64,
    /// 75th percentile (m³).
    pub p75: f64,
    /// Largest sample (m³).
    pub max: f64,
}

impl SampleStatistics {
    /// Compute statistics over `samples`.
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        let sorted = sorted(samples)?;
        Ok(Self {
            count: sorted.len(),
            mean: sorted.iter().mean(),
            std_dev: sorted.iter().std_dev(),
            min: sorted[0],
            p25: percentile_sorted(&sorted, 25.0)?,
            p50: percentile_sorted(&sorted, 50.0)?,
            p75: percentile_sorted(&sorted, 75.0)?,
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Reduce samples to 10th/50th/90th percentiles keyed by place name.
pub fn summarize(samples: &[f64], place_name: &str) -> Result<CleanupResult> {
    let sorted = sorted(samples)?;
    Ok(CleanupResult {
        place_name: place_name.to_string(),
        p10: percentile_sorted(&sorted, 10.0)?,
        p50: percentile_sorted(&sorted, 50.0)?,
        p90: percentile_sorted(&sorted, 90.0)?,
    })
}

/// Percentile `p` (0-100) of an unsorted sample set.
pub fn percentile(samples: &[f64], p: f64) -> Result<f64> {
    percentile_sorted(&sorted(samples)?, p)
}

/// Percentile `p` (0-100) of an ascending slice, interpolating linearly
/// between the two nearest ranks.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Result<f64> {
    if !(0.0..=100.0).contains(&p) {
        return Err(ModelError::InvalidPercentile(p));
    }
    if sorted.is_empty() {
        return Err(ModelError::NoSamples);
    }

    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        Ok(sorted[lower])
    } else {
        let w = rank - lower as f64;
        Ok(sorted[lower] * (1.0 - w) + sorted[upper] * w)
    }
}

fn sorted(samples: &[f64]) -> Result<Vec<f64>> {
    if samples.is_empty() {
        return Err(ModelError::NoSamples);
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Ok(sorted)
}

//! Error types for the model crate.

use thiserror::Error;

/// Errors that can occur while estimating clean-up volume.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A uniform range whose lower end exceeds its upper end, or that is not finite.
    #[error("Invalid {what} range [{min}, {max}]")]
    InvalidRange {
        /// Which quantity the range bounds (thickness, area, volume).
        what: &'static str,
        /// Lower end of the range.
        min: f64,
        /// Upper end of the range.
        max: f64,
    },

    /// A percentile or statistic was requested over an empty sample set.
    #[error("No samples to summarize")]
    NoSamples,

    /// The sampler was asked for zero draws.
    #[error("Sample count must be at least 1")]
    InvalidSampleCount,

    /// A histogram was requested with zero bins.
    #[error("Histogram needs at least 1 bin")]
    InvalidBinCount,

    /// Percentile outside 0-100.
    #[error("Invalid percentile {0} (must be 0-100)")]
    InvalidPercentile(f64),
}

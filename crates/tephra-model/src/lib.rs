//! # tephra-model
//!
//! Monte Carlo estimation of the volume of volcanic tephra (ash) requiring
//! municipal clean-up after an eruption.
//!
//! ## Overview
//!
//! The estimate is built from four pieces:
//!
//! - [`classify`] decides, from the maximum expected thickness, which surfaces
//!   (roads, generic impervious surface, building footprints) need clearing
//!   and bounds their area by ±10%.
//! - [`aggregate_zones`] does the same for isopach input, where every feature
//!   carries its own thickness range, grouping features into heavy, medium
//!   and light zones.
//! - [`VolumeSampler`] draws uniform samples from the resulting bounds.
//! - [`summarize`] reduces the samples to 10th/50th/90th percentiles.
//!
//! This is a planning-grade, order-of-magnitude estimator. It does not model
//! deposition physics, clean-up cost or duration.
//!
//! ## Example
//!
//! ```
//! use tephra_model::{classify, summarize, SampleBounds, ThicknessRange, VolumeSampler};
//!
//! let area = classify(50.0, 1000.0, 2000.0);
//! let bounds = SampleBounds::Joint {
//!     thickness: ThicknessRange::new(5.0, 50.0)?,
//!     area,
//! };
//! let samples = VolumeSampler::default().sample_seeded(&bounds, 42)?;
//! let result = summarize(&samples, "Example")?;
//! assert!(result.p10 <= result.p50 && result.p50 <= result.p90);
//! # Ok::<(), tephra_model::ModelError>(())
//! ```

mod classify;
mod distribution;
mod error;
mod sample;
mod summary;
mod surface;
mod zones;

pub use classify::{classify, SurfaceTotals};
pub use distribution::{EmpiricalCdf, Histogram, HISTOGRAM_BINS};
pub use error::ModelError;
pub use sample::{SampleBounds, VolumeSample, VolumeSampler, DEFAULT_DRAWS};
pub use summary::{percentile, percentile_sorted, summarize, CleanupResult, SampleStatistics};
pub use surface::{
    CleanupAreaBound, CleanupVolumeBound, SurfaceFeature, ThicknessRange, MM_PER_M, PERTURBATION,
};
pub use zones::{aggregate, aggregate_zones, ThicknessZone, ZoneMode, ZoneVolumes};

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

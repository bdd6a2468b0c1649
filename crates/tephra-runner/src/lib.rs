//! # tephra-runner
//!
//! Runs tephra clean-up estimates end to end: configuration, the shared
//! estimation pipeline, and result export. The `tephra` binary is a thin
//! CLI over [`run`].
//!
//! ```no_run
//! use tephra_geometry::GeometryCatalog;
//! use tephra_runner::{run, EstimateRequest, EstimatorConfig};
//!
//! let catalog = GeometryCatalog::from_file("data/napier.json")?;
//! let request = EstimateRequest::for_place("Napier, New Zealand", 5.0, 50.0).with_csv(true);
//! let (estimate, _written) = run(&catalog, &request, &EstimatorConfig::default())?;
//! println!("p50 = {:.0} m³", estimate.result.p50);
//! # Ok::<(), tephra_runner::RunError>(())
//! ```

pub mod config;
mod error;
pub mod export;
mod logging;
pub mod pipeline;

pub use config::{EstimatorConfig, RetryConfig};
pub use error::RunError;
pub use logging::{init_tracing, LOG_ENV};
pub use pipeline::{estimate, run, Estimate, EstimateRequest, ThicknessInput};

/// Result type for estimation runs.
pub type Result<T> = std::result::Result<T, RunError>;

//! Error types for geometry acquisition.

use thiserror::Error;

/// Errors that can occur when fetching or preparing geometry.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider cannot resolve the location descriptor.
    #[error("Location not found: {0}. Try a point and radius or a polygon instead")]
    LocationNotFound(String),

    /// A retryable network-level timeout.
    #[error("Timed out fetching geometry: {0}")]
    TransientTimeout(String),

    /// Every attempt allowed by the retry policy timed out.
    #[error("Gave up fetching geometry after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Message from the last timeout.
        last: String,
    },

    /// I/O error reading a geometry file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed geometry JSON.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Geometry that cannot be used (degenerate rings, inverted thickness ranges).
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}
